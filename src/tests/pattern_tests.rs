#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::errors::PropertyError;
    use crate::implementations::pattern::{MatchTarget, Pattern};
    use crate::implementations::property::Property;

    #[test]
    fn name_pattern_matches_whole_dotted_names() {
        let pattern = Pattern::parse("main.*").unwrap();

        assert_eq!(pattern.target(), MatchTarget::Name);
        assert!(pattern.is_match("main.score"));
        assert!(pattern.is_match("main.lives"));
        assert!(pattern.is_match("main."));
        assert!(!pattern.is_match("other.score"));
        assert!(!pattern.is_match("mainX"));
        assert!(!pattern.is_match("sub.main.score"));
    }

    #[test]
    fn dot_is_literal() {
        let pattern = Pattern::parse("main.score").unwrap();

        assert!(pattern.is_match("main.score"));
        assert!(!pattern.is_match("mainXscore"));
    }

    #[test]
    fn pattern_is_anchored_at_both_ends() {
        let pattern = Pattern::parse("score").unwrap();

        assert!(pattern.is_match("score"));
        assert!(!pattern.is_match("main.score"));
        assert!(!pattern.is_match("scoreboard"));
    }

    #[test]
    fn star_matches_anywhere() {
        let pattern = Pattern::parse("*.score*").unwrap();

        assert!(pattern.is_match("main.score"));
        assert!(pattern.is_match("ui.hud.scoreboard"));
        assert!(!pattern.is_match("score"));
    }

    #[test]
    fn leading_marker_selects_group_mode() {
        let pattern = Pattern::parse("  $ui.* ").unwrap();

        assert_eq!(pattern.target(), MatchTarget::Group);
        assert_eq!(pattern.source(), "  $ui.* ");
        assert!(pattern.is_match("ui.hud"));
        assert!(!pattern.is_match("world"));
    }

    #[test]
    fn group_mode_matches_against_group_not_name() {
        let pattern = Pattern::parse("$ui.*").unwrap();
        let grouped = Property::builder("world.score", 1).group("ui.hud").build();
        let named = Property::builder("ui.score", 1).group("world").build();

        assert!(pattern.matches("world.score", &grouped));
        assert!(!pattern.matches("ui.score", &named));
    }

    #[test]
    fn name_mode_uses_the_registry_key() {
        let pattern = Pattern::parse("lives").unwrap();
        let property = Property::new("other", 1);

        assert!(pattern.matches("lives", &property));
        assert!(!pattern.matches("other", &property));
    }

    #[test]
    fn regex_syntax_passes_through() {
        let pattern = Pattern::parse("main.(score|lives)").unwrap();

        assert!(pattern.is_match("main.score"));
        assert!(pattern.is_match("main.lives"));
        assert!(!pattern.is_match("main.level"));

        let alternation = Pattern::parse("score|lives").unwrap();
        assert!(alternation.is_match("lives"));
        assert!(!alternation.is_match("score|lives"));
        assert!(!alternation.is_match("main.lives"));
    }

    #[test]
    fn malformed_pattern_is_invalid() {
        for raw in ["main.[", "$ui.(", "level)"] {
            match Pattern::parse(raw) {
                Err(PropertyError::InvalidPattern { pattern, reason }) => {
                    assert_eq!(pattern, raw);
                    assert!(!reason.is_empty());
                }
                other => panic!("expected invalid pattern for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn stray_close_paren_cannot_escape_the_anchors() {
        let result = Pattern::parse("a)|(b");
        assert!(matches!(result, Err(PropertyError::InvalidPattern { .. })));

        let grouped = Pattern::parse("(score|lives)").unwrap();
        assert!(grouped.is_match("lives"));
        assert!(!grouped.is_match("xlives"));

        let literal = Pattern::parse(r"a\)|[)]").unwrap();
        assert!(literal.is_match("a)"));
        assert!(literal.is_match(")"));
        assert!(!literal.is_match("xa)"));
    }

    #[test]
    fn empty_group_pattern_matches_ungrouped_properties() {
        let pattern = Pattern::parse("$").unwrap();

        assert!(pattern.is_match(""));
        assert!(!pattern.is_match("ui"));
    }

    proptest! {
        #[test]
        fn literal_names_match_only_themselves(name in "[a-z]{1,8}(\\.[a-z]{1,8}){0,3}") {
            let pattern = Pattern::parse(&name).unwrap();
            prop_assert!(pattern.is_match(&name));
            let extended = format!("{}x", name);
            prop_assert!(!pattern.is_match(&extended));
        }

        #[test]
        fn prefix_glob_matches_any_child(prefix in "[a-z]{1,8}", child in "[a-z.]{0,12}") {
            let pattern = Pattern::parse(&format!("{}.*", prefix)).unwrap();
            let candidate = format!("{}.{}", prefix, child);
            prop_assert!(pattern.is_match(&candidate));
        }
    }
}
