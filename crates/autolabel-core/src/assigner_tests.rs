    use super::*;
    use autolabel_config::AttributesConfig;
    use autolabel_dom::MemoryDocument;
    use autolabel_protocols::{ComputedStyle, Rect, Viewport};

    use crate::cache::ResolutionCache;

    const LABEL: &str = "data-autolabel";

    struct Fixture {
        doc: MemoryDocument,
        body: NodeId,
        oracle: VisibilityOracle,
        cache: ResolutionCache,
        registry: LabelRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let doc = MemoryDocument::new(Viewport::default());
            let body = doc.body().unwrap();
            Self {
                doc,
                body,
                oracle: VisibilityOracle::default(),
                cache: ResolutionCache::new(&AttributesConfig::default()),
                registry: LabelRegistry::new(),
            }
        }

        fn element(&mut self, tag: &str) -> NodeId {
            let id = self.doc.add_element(self.body, tag).unwrap();
            self.doc.set_rect(id, Rect::new(10.0, 10.0, 80.0, 24.0)).unwrap();
            id
        }

        fn assign(&mut self, node: NodeId, index: usize) -> Assignment {
            let assigner = LabelAssigner::new(&self.oracle, LABEL);
            let mut resolver = Resolver::new(&self.oracle, &mut self.cache);
            assigner.assign(&mut self.doc, &mut resolver, &mut self.registry, node, index)
        }
    }

    fn skipped(reason: SkipReason) -> Assignment {
        Assignment::Skipped { reason }
    }

    #[test]
    fn test_registry_suffixes_repeats() {
        let mut registry = LabelRegistry::new();
        assert_eq!(registry.claim("Delete"), "Delete");
        assert_eq!(registry.claim("Delete"), "Delete#2");
        assert_eq!(registry.claim("Edit"), "Edit");
        assert_eq!(registry.claim("Delete"), "Delete#3");
        assert_eq!(registry.count("Delete"), 3);
        assert_eq!(registry.count("Missing"), 0);
    }

    #[test]
    fn test_visible_text_label() {
        let mut fx = Fixture::new();
        let button = fx.element("button");
        fx.doc.add_text(button, "Save").unwrap();

        let assignment = fx.assign(button, 0);
        assert_eq!(
            assignment,
            Assignment::Labeled {
                label: "Save".to_string(),
                base: "Save".to_string(),
                source: LabelSource::VisibleText,
            }
        );
        assert!(assignment.has_overlay());
        assert_eq!(fx.doc.attribute(button, LABEL), Some("Save"));
    }

    #[test]
    fn test_visible_text_beats_aria_label() {
        let mut fx = Fixture::new();
        let button = fx.element("button");
        fx.doc.set_attribute(button, "aria-label", "Submit form").unwrap();
        fx.doc.add_text(button, "Go").unwrap();

        assert_eq!(fx.assign(button, 0).label(), Some("Go"));
    }

    #[test]
    fn test_aria_label_when_no_text() {
        let mut fx = Fixture::new();
        let button = fx.element("button");
        fx.doc.set_attribute(button, "aria-label", "Close").unwrap();

        let assignment = fx.assign(button, 0);
        assert!(matches!(
            assignment,
            Assignment::Labeled { source: LabelSource::AriaLabel, .. }
        ));
        assert_eq!(assignment.label(), Some("Close"));
    }

    #[test]
    fn test_fallback_uses_tag_and_index() {
        let mut fx = Fixture::new();
        let first = fx.element("div");
        let second = fx.element("div");

        assert_eq!(fx.assign(first, 3).label(), Some("div#3"));
        assert_eq!(fx.assign(second, 7).label(), Some("div#7"));
    }

    #[test]
    fn test_fallback_link_reads_as_button() {
        let mut fx = Fixture::new();
        let link = fx.element("a");
        let svg = fx.doc.add_element(link, "svg").unwrap();
        fx.doc.set_rect(svg, Rect::new(10.0, 10.0, 16.0, 16.0)).unwrap();

        let assignment = fx.assign(link, 4);
        assert_eq!(assignment.label(), Some("button#4"));
        assert!(matches!(
            assignment,
            Assignment::Labeled { source: LabelSource::Fallback, .. }
        ));
    }

    #[test]
    fn test_duplicate_text_gets_suffix() {
        let mut fx = Fixture::new();
        let mut labels = vec![];
        for index in 0..3 {
            let button = fx.element("button");
            fx.doc.add_text(button, "Delete").unwrap();
            labels.push(fx.assign(button, index).label().unwrap().to_string());
        }
        assert_eq!(labels, ["Delete", "Delete#2", "Delete#3"]);
    }

    #[test]
    fn test_input_value_fast_path() {
        let mut fx = Fixture::new();
        let input = fx.element("input");
        fx.doc.set_value(input, "🔍 shoes").unwrap();
        fx.doc.set_attribute(input, "placeholder", "Search").unwrap();

        let assignment = fx.assign(input, 0);
        assert_eq!(
            assignment,
            Assignment::Direct {
                label: "shoes".to_string(),
                source: LabelSource::Value,
            }
        );
        assert!(!assignment.has_overlay());
        assert_eq!(fx.doc.attribute(input, LABEL), Some("shoes"));
        assert_eq!(fx.registry.count("shoes"), 0);
    }

    #[test]
    fn test_input_placeholder_fast_path() {
        let mut fx = Fixture::new();
        let textarea = fx.element("textarea");
        fx.doc.set_attribute(textarea, "placeholder", "Message").unwrap();

        assert_eq!(
            fx.assign(textarea, 0),
            Assignment::Direct {
                label: "Message".to_string(),
                source: LabelSource::Placeholder,
            }
        );
    }

    #[test]
    fn test_inputs_bypass_registry() {
        let mut fx = Fixture::new();
        let a = fx.element("input");
        let b = fx.element("input");
        fx.doc.set_attribute(a, "placeholder", "Name").unwrap();
        fx.doc.set_attribute(b, "placeholder", "Name").unwrap();

        assert_eq!(fx.assign(a, 0).label(), Some("Name"));
        assert_eq!(fx.assign(b, 1).label(), Some("Name"));
    }

    #[test]
    fn test_empty_input_uses_resolver() {
        let mut fx = Fixture::new();
        let input = fx.element("input");
        fx.doc.set_attribute(input, "aria-label", "Quantity").unwrap();

        let assignment = fx.assign(input, 2);
        assert!(assignment.has_overlay());
        assert_eq!(assignment.label(), Some("Quantity"));
    }

    #[test]
    fn test_aria_hidden_skipped() {
        let mut fx = Fixture::new();
        let button = fx.element("button");
        fx.doc.set_attribute(button, "aria-hidden", "true").unwrap();
        fx.doc.add_text(button, "Hidden").unwrap();

        assert_eq!(fx.assign(button, 0), skipped(SkipReason::AriaHidden));
        assert_eq!(fx.doc.attribute(button, LABEL), None);
    }

    #[test]
    fn test_aria_hidden_false_eligible() {
        let mut fx = Fixture::new();
        let button = fx.element("button");
        fx.doc.set_attribute(button, "aria-hidden", "false").unwrap();
        fx.doc.add_text(button, "Shown").unwrap();

        assert_eq!(fx.assign(button, 0).label(), Some("Shown"));
    }

    #[test]
    fn test_negative_tabindex_skipped() {
        for value in ["-1", " -2", "-5px", "-99999999999999999999"] {
            let mut fx = Fixture::new();
            let div = fx.element("div");
            fx.doc.set_attribute(div, "tabindex", value).unwrap();
            assert_eq!(fx.assign(div, 0), skipped(SkipReason::NegativeTabIndex), "{}", value);
        }
    }

    #[test]
    fn test_non_negative_or_unparsable_tabindex_eligible() {
        for value in ["0", "-0", "3", "+1", "99999999999999999999", "abc", "", "-"] {
            let mut fx = Fixture::new();
            let div = fx.element("div");
            fx.doc.set_attribute(div, "tabindex", value).unwrap();
            assert!(fx.assign(div, 0).label().is_some(), "{}", value);
        }
    }

    #[test]
    fn test_not_visible_skipped() {
        let mut fx = Fixture::new();
        let hidden = fx.element("button");
        fx.doc.set_style(hidden, ComputedStyle::hidden()).unwrap();
        let below = fx.element("button");
        fx.doc.set_rect(below, Rect::new(10.0, 3000.0, 80.0, 24.0)).unwrap();

        assert_eq!(fx.assign(hidden, 0), skipped(SkipReason::NotVisible));
        assert_eq!(fx.assign(below, 1), skipped(SkipReason::NotVisible));
    }

    #[test]
    fn test_touched_skipped_before_other_checks() {
        let mut fx = Fixture::new();
        let button = fx.element("button");
        fx.doc.add_text(button, "Once").unwrap();

        assert_eq!(fx.assign(button, 0).label(), Some("Once"));
        assert_eq!(fx.assign(button, 0), skipped(SkipReason::AlreadyTouched));
        assert_eq!(fx.registry.count("Once"), 1);
    }

    #[test]
    fn test_descendant_candidate_already_touched() {
        let mut fx = Fixture::new();
        let label = fx.element("label");
        fx.doc.add_text(label, "Remember me").unwrap();
        let checkbox = fx.doc.add_element(label, "button").unwrap();
        fx.doc.set_rect(checkbox, Rect::new(10.0, 10.0, 16.0, 16.0)).unwrap();

        assert_eq!(fx.assign(label, 0).label(), Some("Remember me"));
        assert_eq!(fx.assign(checkbox, 1), skipped(SkipReason::AlreadyTouched));
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("-1"), Some(-1));
        assert_eq!(parse_int_prefix("  42abc"), Some(42));
        assert_eq!(parse_int_prefix("+7"), Some(7));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("1.5"), Some(1));
        assert_eq!(parse_int_prefix("-99999999999999999999"), Some(-i64::MAX));
        assert_eq!(parse_int_prefix("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int_prefix("-000"), Some(0));
    }
