//! Multiple-choice answer matching for the homework sheet.
//!
//! Presentation-only: maps a measured value into one of a question's
//! labelled numeric ranges. Nothing in here touches the pipeline.

/// An inclusive value range paired with the answer label it corresponds to.
pub type Choice = (f64, f64, &'static str);

/// Returns the label of the first range containing `value`.
///
/// `None` means no option fits and the sheet needs a closest-match
/// judgement call.
pub fn match_choice(value: f64, choices: &[Choice]) -> Option<&'static str> {
    choices
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&value))
        .map(|(_, _, label)| *label)
}

/// Question 1: yellow taxi December 2020, uncompressed size in MiB.
pub const YELLOW_DEC_2020_SIZE_MIB: &[Choice] = &[
    (128.0, 129.0, "A. 128.3 MiB"),
    (134.0, 135.0, "B. 134.5 MiB"),
    (364.0, 365.0, "C. 364.7 MiB"),
    (692.0, 693.0, "D. 692.6 MiB"),
];

/// Question 3: yellow taxi 2020, total rows across all months.
pub const YELLOW_2020_TOTAL_ROWS: &[Choice] = &[
    (13_500_000.0, 13_600_000.0, "A. 13,537,299"),
    (24_600_000.0, 24_700_000.0, "B. 24,648,499"),
    (18_300_000.0, 18_400_000.0, "C. 18,324,219"),
    (29_400_000.0, 29_500_000.0, "D. 29,430,127"),
];

/// Question 4: green taxi 2020, total rows across all months.
pub const GREEN_2020_TOTAL_ROWS: &[Choice] = &[
    (5_300_000.0, 5_400_000.0, "A. 5,327,301"),
    (900_000.0, 1_000_000.0, "B. 936,199"),
    (1_700_000.0, 1_800_000.0, "C. 1,734,051"),
    (1_300_000.0, 1_400_000.0, "D. 1,342,034"),
];

/// Question 5: yellow taxi March 2021, row count.
pub const YELLOW_MAR_2021_ROWS: &[Choice] = &[
    (1_400_000.0, 1_450_000.0, "A. 1,428,092"),
    (700_000.0, 750_000.0, "B. 706,911"),
    (1_900_000.0, 1_950_000.0, "C. 1,925,152"),
    (2_550_000.0, 2_600_000.0, "D. 2,561,031"),
];
