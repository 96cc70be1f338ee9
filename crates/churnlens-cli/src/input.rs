//! Reads raw profiles from a JSON file or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, bail};
use churnlens_core::RawProfile;
use serde_json::Value;

/// Read one profile object or an array of them. `-` means stdin.
///
/// Each element is parsed on its own, so one malformed profile does not
/// discard the others.
pub fn read_profiles(path: &Path) -> anyhow::Result<Vec<anyhow::Result<RawProfile>>> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading profile from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading profile {}", path.display()))?
    };
    parse_profiles(&text)
}

fn parse_profiles(text: &str) -> anyhow::Result<Vec<anyhow::Result<RawProfile>>> {
    let document: Value = serde_json::from_str(text).context("parsing profile JSON")?;
    let elements = match document {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => bail!("expected a profile object or an array of them, found {other}"),
    };

    Ok(elements
        .into_iter()
        .enumerate()
        .map(|(i, element)| {
            serde_json::from_value::<RawProfile>(element).with_context(|| {
                format!("profile {} is not an object of text or number values", i + 1)
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use churnlens_core::RawValue;

    #[test]
    fn single_object() {
        let profiles = parse_profiles(r#"{"gender": "Male", "tenure": 5}"#).unwrap();
        assert_eq!(profiles.len(), 1);
        let profile = profiles[0].as_ref().unwrap();
        assert_eq!(profile.get("tenure"), Some(&RawValue::Number(5.0)));
        assert_eq!(profile.get("gender"), Some(&RawValue::Text("Male".into())));
    }

    #[test]
    fn array_of_objects() {
        let profiles = parse_profiles(r#"[{"gender": "Male"}, {"gender": "Female"}]"#).unwrap();
        assert_eq!(profiles.len(), 2);
        assert!(profiles.iter().all(|p| p.is_ok()));
    }

    #[test]
    fn bad_element_fails_only_itself() {
        let profiles =
            parse_profiles(r#"[{"gender": "Male"}, {"gender": true}, {"gender": null}, 7]"#)
                .unwrap();
        assert_eq!(profiles.len(), 4);
        assert_eq!(
            profiles[0].as_ref().unwrap().get("gender"),
            Some(&RawValue::Text("Male".into()))
        );

        let err = profiles[1].as_ref().unwrap_err();
        assert!(err.to_string().contains("profile 2"), "{err}");
        assert!(profiles[2].is_err());
        assert!(profiles[3].is_err());
    }

    #[test]
    fn rejects_non_object_document() {
        assert!(parse_profiles("42").is_err());
        assert!(parse_profiles("{ not json").is_err());

        let nested = parse_profiles(r#"{"gender": ["Male"]}"#).unwrap();
        assert!(nested[0].is_err());
    }
}
