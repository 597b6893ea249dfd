/// Canonical names of the 64 figures in King Wen order.

/// Number of figures in the canonical sequence.
pub const FIGURE_COUNT: u8 = 64;

const NAMES: [&str; FIGURE_COUNT as usize] = [
    "乾", "坤", "屯", "蒙", "需", "讼", "师", "比",
    "小畜", "履", "泰", "否", "同人", "大有", "谦", "豫",
    "随", "蛊", "临", "观", "噬嗑", "贲", "剥", "复",
    "无妄", "大畜", "颐", "大过", "坎", "离", "咸", "恒",
    "遁", "大壮", "晋", "明夷", "家人", "睽", "蹇", "解",
    "损", "益", "夬", "姤", "萃", "升", "困", "井",
    "革", "鼎", "震", "艮", "渐", "归妹", "丰", "旅",
    "巽", "兑", "涣", "节", "中孚", "小过", "既济", "未济",
];

/// Look up the canonical name for an ordinal in `1..=64`.
pub fn canonical_name(ordinal: u8) -> Option<&'static str> {
    if ordinal == 0 {
        return None;
    }
    NAMES.get(usize::from(ordinal) - 1).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(canonical_name(0), None);
        assert_eq!(canonical_name(1), Some("乾"));
        assert_eq!(canonical_name(64), Some("未济"));
        assert_eq!(canonical_name(65), None);
    }

    #[test]
    fn two_glyph_names() {
        assert_eq!(canonical_name(9), Some("小畜"));
        assert_eq!(canonical_name(54), Some("归妹"));
        assert_eq!(canonical_name(63), Some("既济"));
    }

    #[test]
    fn names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for name in NAMES.iter() {
            assert!(seen.insert(*name), "duplicate name {}", name);
        }
    }
}
