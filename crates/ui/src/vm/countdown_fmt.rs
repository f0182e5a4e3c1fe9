/// Remaining exam time as `MM : SS`, both parts zero-padded.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes:02} : {remainder:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_exam_reads_fifty_nine_minutes() {
        assert_eq!(format_countdown(3540), "59 : 00");
    }

    #[test]
    fn pads_single_digits() {
        assert_eq!(format_countdown(65), "01 : 05");
        assert_eq!(format_countdown(0), "00 : 00");
    }
}
