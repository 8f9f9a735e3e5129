use crate::types::Config;
use anyhow::Result;
use std::fs;

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use crate::types::Config;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.io.input_dir, "frames");
        assert_eq!(config.io.output_dir, "output");
        assert!(config.io.save_annotated);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = "io:\n  input_dir: captures\n  output_dir: annotated\n  save_annotated: false\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.io.input_dir, "captures");
        assert!(!config.io.save_annotated);
        // missing sections fall back to defaults
        assert_eq!(config.logging.level, "info");
    }
}
