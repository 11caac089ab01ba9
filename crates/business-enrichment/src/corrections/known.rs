//! Corrections found through earlier manual searches.

use crate::types::{CorrectionEntry, Field};

/// Built-in correction set, in application order.
pub fn known_corrections() -> Vec<CorrectionEntry> {
    vec![
        // NKD Ramstein
        CorrectionEntry::new("0b0b0b0b-0c0c-4d0d-0e0e-0f0f0f0f0f0f")
            .set(Field::Address, "Bahnhofstr. 3a, 66877 Ramstein-Miesenbach")
            .set(Field::Website, "https://www.nkd.com/")
            .set(Field::Phone, "+49 6371 465577"),
        // Hans im Glück
        CorrectionEntry::new("0b1c2d3e-4f5a-4b6c-7d8e-9f0a1b2c3d4e")
            .set(Field::Address, "Fruchthallstraße 7-9, 67655 Kaiserslautern")
            .set(Field::Website, "https://hansimglueck-burgergrill.de/")
            .set(Field::Phone, "+49 631 62799007"),
        // GTÜ Schönaich
        CorrectionEntry::new("0c878ec6-5838-41e1-8d1e-2adbd4c5db50")
            .set(Field::Address, "Mercedesstraße 22, 71101 Schönaich")
            .set(Field::Website, "https://www.ibk-stuttgart.de"),
    ]
}
