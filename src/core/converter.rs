/// The conversion job: read transcription → parse → emit → write.

use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::config::{ConfigError, ConvertConfig};
use crate::core::emitter::{EmitError, TableEmitter, TableFormat};
use crate::core::parser::{parse_text, ParseStats, ParsedText};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("cannot read input '{path}': {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write output '{path}': {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("emit error: {0}")]
    Emit(#[from] EmitError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub parsed: ParsedText,
    pub output: PathBuf,
    pub format: TableFormat,
    pub bytes_written: usize,
}

impl ConvertSummary {
    pub fn figure_count(&self) -> usize {
        self.parsed.figures.len()
    }

    pub fn line_count(&self) -> usize {
        self.parsed.figures.iter().map(|f| f.lines.len()).sum()
    }

    pub fn stats(&self) -> &ParseStats {
        &self.parsed.stats
    }
}

/// Runs one conversion. Built via `Converter::builder()`.
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConvertConfig,
}

/// Builder for constructing a `Converter`.
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    config_path: Option<PathBuf>,
    /// Directly provided settings (for testing without files).
    config: Option<ConvertConfig>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format_name: Option<String>,
    js_binding: Option<String>,
    sample: Option<bool>,
}

impl Converter {
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::default()
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Read and parse the configured input without writing anything.
    pub fn parse_input(&self) -> Result<ParsedText, ConvertError> {
        let path = &self.config.input;
        let text = std::fs::read_to_string(path).map_err(|source| ConvertError::ReadInput {
            path: path.clone(),
            source,
        })?;
        let parsed = parse_text(&text);
        info!(
            "parsed {} figures ({} line records) from '{}'",
            parsed.stats.figures,
            parsed.stats.line_records,
            path.display()
        );
        Ok(parsed)
    }

    /// Render figures in the configured format.
    pub fn render(&self, parsed: &ParsedText) -> Result<String, ConvertError> {
        let emitter = TableEmitter::new(self.config.resolved_format())
            .with_js_binding(self.config.js_binding.clone());
        Ok(emitter.render(&parsed.figures)?)
    }

    /// Run the whole job. The input is read in full and the table rendered
    /// before the output file is touched.
    pub fn run(&self) -> Result<ConvertSummary, ConvertError> {
        let parsed = self.parse_input()?;
        let rendered = self.render(&parsed)?;
        write_output(&self.config.output, &rendered)?;

        let format = self.config.resolved_format();
        info!(
            "wrote {} table ({} bytes) to '{}'",
            format,
            rendered.len(),
            self.config.output.display()
        );
        Ok(ConvertSummary {
            parsed,
            output: self.config.output.clone(),
            format,
            bytes_written: rendered.len(),
        })
    }
}

fn write_output(path: &Path, contents: &str) -> Result<(), ConvertError> {
    let to_err = |source| ConvertError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_err)?;
    }
    std::fs::write(path, contents).map_err(to_err)
}

impl ConverterBuilder {
    /// Load base settings from a RON config file.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Use these base settings instead of a config file.
    pub fn with_config(mut self, config: ConvertConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = Some(path.into());
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Output format by name (`json`, `js`, `ron`).
    pub fn format(mut self, name: impl Into<String>) -> Self {
        self.format_name = Some(name.into());
        self
    }

    pub fn js_binding(mut self, binding: impl Into<String>) -> Self {
        self.js_binding = Some(binding.into());
        self
    }

    pub fn sample(mut self, sample: bool) -> Self {
        self.sample = Some(sample);
        self
    }

    /// Resolve settings: defaults, then config file or direct config, then
    /// the individual overrides.
    pub fn build(self) -> Result<Converter, ConvertError> {
        let mut config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => ConvertConfig::load_from_ron(&path)?,
            (None, None) => ConvertConfig::default(),
        };

        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(name) = self.format_name {
            config.set_format_name(&name)?;
        }
        if let Some(binding) = self.js_binding {
            config.js_binding = binding;
        }
        if let Some(sample) = self.sample {
            config.sample = sample;
        }

        Ok(Converter { config })
    }
}
