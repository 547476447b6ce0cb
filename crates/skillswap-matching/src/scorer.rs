//! Compatibility scoring between a teacher's and a learner's proficiency.

use skillswap_common::models::Proficiency;
use skillswap_common::SkillSwapResult;

/// Teacher is one or two levels ahead of the learner.
pub const PERFECT: u8 = 100;
/// Teacher and learner are at the same level.
pub const EQUAL: u8 = 80;
/// Teacher is three levels ahead. Three proficiency levels never produce this gap.
pub const STRETCH: u8 = 60;
/// Teacher is behind the learner.
pub const MISMATCH: u8 = 40;

/// Score how well someone at `teacher` level can teach someone at `learner` level.
pub fn compatibility(teacher: Proficiency, learner: Proficiency) -> u8 {
    match teacher.ordinal() - learner.ordinal() {
        1 | 2 => PERFECT,
        0 => EQUAL,
        3 => STRETCH,
        _ => MISMATCH,
    }
}

/// [`compatibility`] over raw backend labels such as `"advanced"`.
pub fn compatibility_from_labels(teacher: &str, learner: &str) -> SkillSwapResult<u8> {
    Ok(compatibility(teacher.parse()?, learner.parse()?))
}

/// Score for a two-way exchange: the mean of both directions, rounded down.
pub fn exchange_score(i_teach: u8, they_teach: u8) -> u8 {
    ((u16::from(i_teach) + u16::from(they_teach)) / 2) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use Proficiency::*;

    #[test]
    fn full_table() {
        let expected = [
            (Beginner, Beginner, EQUAL),
            (Beginner, Intermediate, MISMATCH),
            (Beginner, Advanced, MISMATCH),
            (Intermediate, Beginner, PERFECT),
            (Intermediate, Intermediate, EQUAL),
            (Intermediate, Advanced, MISMATCH),
            (Advanced, Beginner, PERFECT),
            (Advanced, Intermediate, PERFECT),
            (Advanced, Advanced, EQUAL),
        ];
        for (teacher, learner, score) in expected {
            assert_eq!(compatibility(teacher, learner), score, "{teacher} teaching {learner}");
        }
    }

    #[test]
    fn stretch_score_is_never_produced() {
        for teacher in Proficiency::ALL {
            for learner in Proficiency::ALL {
                assert_ne!(compatibility(teacher, learner), STRETCH);
            }
        }
    }

    #[test]
    fn labels_are_parsed_case_insensitively() {
        assert_eq!(compatibility_from_labels("Advanced", "beginner").unwrap(), 100);
        assert_eq!(compatibility_from_labels("beginner", "advanced").unwrap(), 40);
        assert!(compatibility_from_labels("guru", "beginner").is_err());
    }

    #[test]
    fn exchange_score_rounds_down() {
        assert_eq!(exchange_score(PERFECT, PERFECT), 100);
        assert_eq!(exchange_score(PERFECT, EQUAL), 90);
        assert_eq!(exchange_score(EQUAL, MISMATCH), 60);
        assert_eq!(exchange_score(1, 2), 1);
    }
}
