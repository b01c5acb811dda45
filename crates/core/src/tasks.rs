//! Task label color management
//!
//! Gives every task label a stable color so its progress line and its
//! deferred log entries are easy to match up in terminal output.

use colored::Color;

/// Label colors. Red and yellow are left to warn and error lines.
const LABEL_PALETTE: [(u8, u8, u8); 6] = [
    (86, 156, 214),  // steel blue
    (78, 201, 176),  // sea green
    (197, 134, 192), // orchid
    (220, 160, 90),  // amber
    (106, 153, 255), // cornflower
    (156, 220, 254), // sky
];

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Get a consistent color for a task label
pub fn get_label_color(label: &str) -> Color {
    // 32-bit FNV-1a, stable across runs and platforms
    let hash = label
        .bytes()
        .fold(FNV_OFFSET, |acc, b| (acc ^ u32::from(b)).wrapping_mul(FNV_PRIME));

    let (r, g, b) = LABEL_PALETTE[hash as usize % LABEL_PALETTE.len()];
    Color::TrueColor { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_label_color_is_stable() {
        assert_eq!(get_label_color("Create folder"), get_label_color("Create folder"));
    }

    #[test]
    fn test_labels_spread_over_the_palette() {
        let labels = [
            "Check target",
            "Create folder",
            "Initialize project",
            "Remove project",
            "inspect",
            "bootstrap",
            "build",
            "deploy",
        ];
        let colors: HashSet<String> = labels
            .iter()
            .map(|label| format!("{:?}", get_label_color(label)))
            .collect();

        assert!(colors.len() > 1);
    }
}
