//! The layering run: base document, patches in order, encoded output
//!
//! The run is strictly sequential. Strategy and output format names are
//! validated before anything is fetched, and the first failure aborts the
//! run with the stage and locator it happened in.

use laminate_core::types::{Format, MergeStrategy, Stage};
use laminate_source::SourceResolver;
use tracing::{debug, info};

use crate::document::ConfigDocument;
use crate::ConfigResult;

#[cfg(test)]
mod tests;

/// Inputs of one layering run, as named by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRequest {
    /// Base document locator
    pub source: String,
    /// Patch locators, applied in order
    pub patches: Vec<String>,
    /// `overwrite` or `preserve`
    pub merge_strategy: String,
    /// Output format name; `None` keeps the base document's format
    pub output_format: Option<String>,
}

impl LayerRequest {
    /// Request for a base document with no patches and the default strategy
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            patches: Vec::new(),
            merge_strategy: MergeStrategy::default().to_string(),
            output_format: None,
        }
    }

    pub fn with_patches<I, S>(mut self, patches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patches = patches.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_merge_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.merge_strategy = strategy.into();
        self
    }

    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = Some(format.into());
        self
    }
}

/// Encoded result of a layering run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOutput {
    pub format: Format,
    pub bytes: Vec<u8>,
}

/// Runs layering requests against a resolver
#[derive(Debug)]
pub struct Pipeline<'a> {
    resolver: &'a SourceResolver,
}

impl<'a> Pipeline<'a> {
    pub fn new(resolver: &'a SourceResolver) -> Self {
        Self { resolver }
    }

    /// Load the base, apply every patch in order and encode the result
    pub fn run(&self, request: &LayerRequest) -> ConfigResult<LayerOutput> {
        let strategy: MergeStrategy = request.merge_strategy.parse()?;
        let requested = request
            .output_format
            .as_deref()
            .map(str::parse::<Format>)
            .transpose()?;

        info!(
            "Layering {} patch(es) onto {} ({})",
            request.patches.len(),
            request.source,
            strategy
        );

        let mut document = ConfigDocument::load(self.resolver, &request.source)
            .map_err(|e| e.in_stage(Stage::LoadSource, &request.source))?;
        debug!("Base document {} is {}", request.source, document.format());

        for locator in &request.patches {
            let patch = ConfigDocument::load(self.resolver, locator)
                .map_err(|e| e.in_stage(Stage::LoadPatch, locator))?;
            document
                .merge(patch, strategy)
                .map_err(|e| e.in_stage(Stage::ApplyPatch, locator))?;
        }

        let format = crate::serialize::output_format(requested, document.format());
        let bytes = document
            .encode(Some(format))
            .map_err(|e| e.in_stage(Stage::EncodeOutput, &request.source))?;

        info!("Produced {} bytes of {}", bytes.len(), format);
        Ok(LayerOutput { format, bytes })
    }
}
