//! Conversion of a parsed catalog into tag tests and checks.

use regex::Regex;
use serde_yaml::Value;
use tracing::debug;

use super::schema::Catalog;
use crate::checks::Check;
use crate::error::{InitCheckError, Result};
use crate::evaluator::Evaluator;
use crate::tags::{TagTest, DEFAULT_TAG};

impl Catalog {
    /// Convert every tag value into a [`TagTest`], in file order.
    ///
    /// A string is a case-insensitive pattern. A table with a `regex` key is
    /// compiled as written, case-sensitive unless `ignore_case: true`.
    /// Anything else is rejected naming the tag.
    pub fn tag_tests(&self) -> Result<Vec<(String, TagTest)>> {
        self.tags
            .iter()
            .map(|(name, value)| Ok((name.clone(), tag_test(name, value)?)))
            .collect()
    }

    /// Build the checks for `environment`, in file order.
    pub fn checks(&self, environment: &str) -> Result<Vec<(String, Check)>> {
        self.checks
            .iter()
            .map(|(name, spec)| {
                let predicate =
                    spec.probe
                        .clone()
                        .into_predicate(name, environment, &self.base_dir)?;
                let check = Check::fallible(predicate).with_messages(spec.messages.clone());
                Ok((name.clone(), check))
            })
            .collect()
    }

    /// Register every tag and check on `evaluator`.
    ///
    /// Nothing is registered unless the whole catalog converts.
    pub fn apply(&self, evaluator: &mut Evaluator) -> Result<()> {
        let tags = self.tag_tests()?;
        let checks = self.checks(evaluator.environment())?;
        debug!(
            "Applying catalog with {} tag(s) and {} check(s)",
            tags.len(),
            checks.len()
        );

        for (name, test) in tags {
            evaluator.add_tag_definition(name, test)?;
        }
        for (name, check) in checks {
            evaluator.add_check(name, check);
        }
        Ok(())
    }
}

fn tag_test(name: &str, value: &Value) -> Result<TagTest> {
    if name == DEFAULT_TAG {
        return Err(InitCheckError::ReservedTagName {
            tag: name.to_string(),
        });
    }

    match value {
        Value::String(pattern) => TagTest::pattern(name, pattern),
        Value::Mapping(table) => {
            let pattern = table
                .get("regex")
                .and_then(Value::as_str)
                .ok_or_else(|| unsupported(name, "table without a regex string"))?;
            let ignore_case = match table.get("ignore_case") {
                None => false,
                Some(Value::Bool(flag)) => *flag,
                Some(other) => return Err(unsupported(name, value_kind(other))),
            };
            if table.len() > 1 + usize::from(table.contains_key("ignore_case")) {
                return Err(unsupported(name, "table with unknown keys"));
            }

            let source = if ignore_case {
                format!("(?i){pattern}")
            } else {
                pattern.to_string()
            };
            Regex::new(&source)
                .map(TagTest::matcher)
                .map_err(|e| InitCheckError::InvalidTagPattern {
                    tag: name.to_string(),
                    message: e.to_string(),
                })
        }
        other => Err(unsupported(name, value_kind(other))),
    }
}

fn unsupported(name: &str, found: &str) -> InitCheckError {
    InitCheckError::UnsupportedTagTest {
        tag: name.to_string(),
        found: found.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "table",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;
    use crate::checks::Message;
    use std::path::Path;

    fn catalog(yaml: &str) -> Catalog {
        parse_catalog(yaml, Path::new("catalog.yml")).unwrap()
    }

    fn evaluator(environment: &str) -> Evaluator {
        Evaluator::new(environment, || Ok(()), |_: &[Message]| Ok(())).unwrap()
    }

    #[test]
    fn string_tag_is_case_insensitive_pattern() {
        let tests = catalog("tags:\n  android: android\n").tag_tests().unwrap();
        assert_eq!(tests[0].0, "android");
        assert!(tests[0].1.matches("Linux; ANDROID 14", "android"));
    }

    #[test]
    fn regex_table_is_case_sensitive_by_default() {
        let tests = catalog("tags:\n  ios:\n    regex: iPhone\n")
            .tag_tests()
            .unwrap();
        assert!(tests[0].1.matches("(iPhone; CPU)", "ios"));
        assert!(!tests[0].1.matches("(iphone; cpu)", "ios"));
    }

    #[test]
    fn regex_table_can_ignore_case() {
        let tests = catalog("tags:\n  ios:\n    regex: iPhone\n    ignore_case: true\n")
            .tag_tests()
            .unwrap();
        assert!(tests[0].1.matches("(iphone; cpu)", "ios"));
    }

    #[test]
    fn number_tag_is_unsupported_and_named() {
        let err = catalog("tags:\n  legacy: 42\n").tag_tests().err().unwrap();
        match err {
            InitCheckError::UnsupportedTagTest { tag, found } => {
                assert_eq!(tag, "legacy");
                assert_eq!(found, "number");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn sequence_and_bad_tables_are_unsupported() {
        let err = catalog("tags:\n  multi: [a, b]\n").tag_tests().err().unwrap();
        assert!(matches!(err, InitCheckError::UnsupportedTagTest { .. }));

        let err = catalog("tags:\n  odd:\n    pattern: a\n")
            .tag_tests()
            .err()
            .unwrap();
        assert!(matches!(err, InitCheckError::UnsupportedTagTest { .. }));

        let err = catalog("tags:\n  odd:\n    regex: a\n    extra: 1\n")
            .tag_tests()
            .err()
            .unwrap();
        assert!(matches!(err, InitCheckError::UnsupportedTagTest { .. }));
    }

    #[test]
    fn invalid_tag_pattern_is_reported() {
        let err = catalog("tags:\n  broken: \"(\"\n").tag_tests().err().unwrap();
        assert!(matches!(err, InitCheckError::InvalidTagPattern { ref tag, .. } if tag == "broken"));
    }

    #[test]
    fn apply_registers_tags_and_checks_in_order() {
        let yaml = r#"
tags:
  android: android
  mobile: mobile
checks:
  modern:
    probe: { type: environment_matches, pattern: "chrome/1[2-9][0-9]" }
    messages:
      - title: Update Chrome
        tags: [android]
  cookies:
    probe: { type: always, pass: true }
"#;
        let mut ev = evaluator("Linux; Android 14; Mobile Chrome/99.0");
        catalog(yaml).apply(&mut ev).unwrap();

        assert_eq!(ev.tags().names().collect::<Vec<_>>(), vec!["android", "mobile"]);
        let names: Vec<_> = ev.checks().iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["modern", "cookies"]);

        ev.run().unwrap();
        assert_eq!(ev.failure_messages()[0].title, "Update Chrome");
    }

    #[test]
    fn apply_registers_nothing_when_a_tag_is_invalid() {
        let yaml = r#"
tags:
  good: a
  bad: true
checks:
  cookies:
    probe: { type: always, pass: true }
"#;
        let mut ev = evaluator("desktop");
        assert!(catalog(yaml).apply(&mut ev).is_err());
        assert!(ev.tags().is_empty());
        assert!(ev.checks().is_empty());
    }

    #[test]
    fn reserved_tag_in_catalog_is_rejected() {
        let mut ev = evaluator("desktop");
        let err = catalog("tags:\n  mobile: mobile\n  default: anything\n")
            .apply(&mut ev)
            .unwrap_err();
        assert!(matches!(err, InitCheckError::ReservedTagName { .. }));
        assert!(ev.tags().is_empty());
    }
}
