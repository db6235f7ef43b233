use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Input documents are JSON unless the extension says YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                InputFormat::Yaml
            }
            _ => InputFormat::Json,
        }
    }
}

/// Deserialise a calculation input from a JSON or YAML file.
pub fn read_document<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read input '{}': {}", resolved.display(), e))?;
    parse_document(&contents, InputFormat::from_path(&resolved))
        .map_err(|e| format!("Failed to parse input '{}': {}", resolved.display(), e).into())
}

pub fn parse_document<T: DeserializeOwned>(
    contents: &str,
    format: InputFormat,
) -> Result<T, Box<dyn std::error::Error>> {
    Ok(match format {
        InputFormat::Json => serde_json::from_str(contents)?,
        InputFormat::Yaml => serde_yaml::from_str(contents)?,
    })
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if !resolved.is_file() {
        return Err(format!("Input file not found: {}", resolved.display()).into());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use finance_consulting_core::calculator::loan::LoanInput;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("loan.yaml")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("loan.YML")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("loan.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("loan")), InputFormat::Json);
    }

    #[test]
    fn test_yaml_and_json_inputs_agree() {
        let json = r#"{"principal": "250000", "annual_rate": "0.045", "years": 30}"#;
        let yaml = "principal: \"250000\"\nannual_rate: \"0.045\"\nyears: 30\n";
        let a: LoanInput = parse_document(json, InputFormat::Json).unwrap();
        let b: LoanInput = parse_document(yaml, InputFormat::Yaml).unwrap();
        assert_eq!(a.principal, dec!(250000));
        assert_eq!(b.principal, a.principal);
        assert_eq!(b.years, 30);
    }

    #[test]
    fn test_missing_file() {
        let err = read_document::<LoanInput>("/no/such/loan.json").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
