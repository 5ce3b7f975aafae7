//! Count-based summary wording.

use crate::model::resource::ResourceKind;

/// Describes `count` resources of `kind` in a human-readable sentence.
///
/// Zero, one and many each have distinct wording.
pub fn describe_count(kind: ResourceKind, count: u64) -> String {
    match count {
        0 => format!("No {} available", kind.plural),
        1 => format!("There is 1 {}", kind.singular),
        n => format!("There are {n} {}", kind.plural),
    }
}

#[cfg(test)]
mod tests {
    use super::describe_count;
    use crate::model::resource::ResourceKind;

    #[test]
    fn wording_distinguishes_zero_one_and_many() {
        assert_eq!(describe_count(ResourceKind::NOTE, 0), "No notes available");
        assert_eq!(describe_count(ResourceKind::NOTE, 1), "There is 1 note");
        assert_eq!(describe_count(ResourceKind::NOTE, 2), "There are 2 notes");
        assert_eq!(describe_count(ResourceKind::USER, 3), "There are 3 users");
    }
}
