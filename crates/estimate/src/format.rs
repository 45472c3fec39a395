/// Format a rupee amount rounded to whole rupees with Indian digit
/// grouping, e.g. `₹ 19,20,000`.
pub fn format_rupees(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("₹ {}{}", sign, group_indian(rounded.abs() as u64))
}

/// Last three digits, then groups of two.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_like_indian_numbering() {
        assert_eq!(format_rupees(0.0), "₹ 0");
        assert_eq!(format_rupees(999.0), "₹ 999");
        assert_eq!(format_rupees(1000.0), "₹ 1,000");
        assert_eq!(format_rupees(166_000.0), "₹ 1,66,000");
        assert_eq!(format_rupees(1_920_000.0), "₹ 19,20,000");
        assert_eq!(format_rupees(123_456_789.0), "₹ 12,34,56,789");
    }

    #[test]
    fn rounds_to_whole_rupees() {
        assert_eq!(format_rupees(1151999.6), "₹ 11,52,000");
        assert_eq!(format_rupees(-2500.0), "₹ -2,500");
    }
}
