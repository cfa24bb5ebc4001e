/// Column holding the free-text rating, e.g. `4.1/5`.
pub const RATE_COLUMN: &str = "rate";

/// Parses a `score/max` rating cell into its score.
///
/// Only the text before the first `/` is considered; a cell without a `/` is
/// read whole. Anything that is not a finite float (placeholders such as
/// `NEW` or `-`, blanks, `nan`) yields `None`.
pub fn parse_rating(raw: &str) -> Option<f64> {
    let candidate = raw.split('/').next().unwrap_or_default().trim();
    if candidate.is_empty() {
        return None;
    }
    candidate.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_score_before_slash() {
        assert_eq!(parse_rating("4.1/5"), Some(4.1));
        assert_eq!(parse_rating("3.9 /5"), Some(3.9));
        assert_eq!(parse_rating("2/5/extra"), Some(2.0));
    }

    #[test]
    fn parses_bare_numbers() {
        assert_eq!(parse_rating("3.5"), Some(3.5));
        assert_eq!(parse_rating(" 4 "), Some(4.0));
    }

    #[test]
    fn placeholders_are_missing() {
        assert_eq!(parse_rating("NEW"), None);
        assert_eq!(parse_rating("-"), None);
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("/5"), None);
        assert_eq!(parse_rating("NaN/5"), None);
        assert_eq!(parse_rating("inf"), None);
    }
}
