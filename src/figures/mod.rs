//! Manuscript figure catalog.
//!
//! Every entry is a pure builder from a [`FigureContext`] to a [`Figure`];
//! rendering and file output happen elsewhere.

mod biomimetic;
mod diagrams;
mod environment;
mod model_validation;
mod natural_effects;
mod overview;
mod principles;
mod principles_alt;
mod pycnocline;
pub mod styles;

use indexmap::IndexMap;
use tracing::debug;

use crate::api::Figure;
use crate::core::NoiseSource;
use crate::core::noise::DEFAULT_NOISE_SEED;
use crate::error::{FigureError, FigureResult};

pub type FigureBuilder = fn(&FigureContext) -> FigureResult<Figure>;

/// Inputs shared by every figure builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureContext {
    pub seed: u64,
}

impl FigureContext {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Independent noise stream for one figure or panel.
    #[must_use]
    pub fn noise(&self, salt: u64) -> NoiseSource {
        NoiseSource::seeded(self.seed).fork(salt)
    }
}

impl Default for FigureContext {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FigureId {
    BiomimeticStrategies,
    PycnoclineDetectability,
    ModelValidation,
    EnvironmentalApplications,
    SchlierenPrinciples,
    SchlierenAnalysis,
    SchlierenApplications,
    SchlierenPrinciplesAlt,
    NaturalSchlierenEffects,
    LightDeflectionPrinciple,
    ClassicalSchlieren,
    RainbowSchlieren,
    BosSystem,
    MethodsComparison,
    SchlierenOverview,
}

impl FigureId {
    pub const ALL: [FigureId; 15] = [
        FigureId::BiomimeticStrategies,
        FigureId::PycnoclineDetectability,
        FigureId::ModelValidation,
        FigureId::EnvironmentalApplications,
        FigureId::SchlierenPrinciples,
        FigureId::SchlierenAnalysis,
        FigureId::SchlierenApplications,
        FigureId::SchlierenPrinciplesAlt,
        FigureId::NaturalSchlierenEffects,
        FigureId::LightDeflectionPrinciple,
        FigureId::ClassicalSchlieren,
        FigureId::RainbowSchlieren,
        FigureId::BosSystem,
        FigureId::MethodsComparison,
        FigureId::SchlierenOverview,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BiomimeticStrategies => "biomimetic-strategies",
            Self::PycnoclineDetectability => "pycnocline-detectability",
            Self::ModelValidation => "model-validation",
            Self::EnvironmentalApplications => "environmental-applications",
            Self::SchlierenPrinciples => "schlieren-principles",
            Self::SchlierenAnalysis => "schlieren-analysis",
            Self::SchlierenApplications => "schlieren-applications",
            Self::SchlierenPrinciplesAlt => "schlieren-principles-alt",
            Self::NaturalSchlierenEffects => "natural-schlieren-effects",
            Self::LightDeflectionPrinciple => "light-deflection-principle",
            Self::ClassicalSchlieren => "classical-schlieren",
            Self::RainbowSchlieren => "rainbow-schlieren",
            Self::BosSystem => "bos-system",
            Self::MethodsComparison => "methods-comparison",
            Self::SchlierenOverview => "schlieren-overview",
        }
    }

    /// Default PNG file name.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::BiomimeticStrategies => "figure5_biomimetic_schlieren.png",
            Self::PycnoclineDetectability => "figure7_detectability_pycnoclines_final.png",
            Self::ModelValidation => "figure3_model_validation.png",
            Self::EnvironmentalApplications => "figure4_environmental_applications.png",
            Self::SchlierenPrinciples => "figure_1_schlieren_principles.png",
            Self::SchlierenAnalysis => "figure_2_schlieren_analysis.png",
            Self::SchlierenApplications => "figure_3_schlieren_applications.png",
            Self::SchlierenPrinciplesAlt => "figure_1_schlieren_principles_alt.png",
            Self::NaturalSchlierenEffects => "figure_sp2_natural_schlieren_effects.png",
            Self::LightDeflectionPrinciple => "schlieren_light_deflection_principle.png",
            Self::ClassicalSchlieren => "classical_schlieren_system.png",
            Self::RainbowSchlieren => "rainbow_schlieren_system.png",
            Self::BosSystem => "bos_system.png",
            Self::MethodsComparison => "schlieren_methods_comparison.png",
            Self::SchlierenOverview => "schlieren_complete_overview.png",
        }
    }

    pub fn parse(input: &str) -> FigureResult<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == input)
            .ok_or_else(|| FigureError::InvalidConfig(format!("unknown figure id `{input}`")))
    }

    fn builder(self) -> FigureBuilder {
        match self {
            Self::BiomimeticStrategies => biomimetic::biomimetic_strategies,
            Self::PycnoclineDetectability => pycnocline::pycnocline_detectability,
            Self::ModelValidation => model_validation::model_validation,
            Self::EnvironmentalApplications => environment::environmental_applications,
            Self::SchlierenPrinciples => principles::schlieren_principles,
            Self::SchlierenAnalysis => principles::schlieren_analysis,
            Self::SchlierenApplications => principles::schlieren_applications,
            Self::SchlierenPrinciplesAlt => principles_alt::schlieren_principles_alt,
            Self::NaturalSchlierenEffects => natural_effects::natural_schlieren_effects,
            Self::LightDeflectionPrinciple => diagrams::light_deflection_principle,
            Self::ClassicalSchlieren => diagrams::classical_schlieren,
            Self::RainbowSchlieren => diagrams::rainbow_schlieren,
            Self::BosSystem => diagrams::bos_system,
            Self::MethodsComparison => diagrams::methods_comparison,
            Self::SchlierenOverview => overview::schlieren_overview,
        }
    }

    pub fn build(self, context: &FigureContext) -> FigureResult<Figure> {
        let figure = (self.builder())(context)?;
        debug!(
            figure = self.as_str(),
            panels = figure.axes().len(),
            seed = context.seed,
            "built figure"
        );
        Ok(figure)
    }
}

impl std::fmt::Display for FigureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: FigureId,
    pub file_name: &'static str,
    pub build: FigureBuilder,
}

/// All figures keyed by id, in manuscript order.
#[must_use]
pub fn catalog() -> IndexMap<&'static str, CatalogEntry> {
    FigureId::ALL
        .into_iter()
        .map(|id| {
            (
                id.as_str(),
                CatalogEntry {
                    id,
                    file_name: id.file_name(),
                    build: id.builder(),
                },
            )
        })
        .collect()
}

/// Resolves a selection of ids, keeping catalog order; empty means all.
pub fn select(only: &[String]) -> FigureResult<Vec<FigureId>> {
    if only.is_empty() {
        return Ok(FigureId::ALL.to_vec());
    }
    let requested = only
        .iter()
        .map(|raw| FigureId::parse(raw))
        .collect::<FigureResult<Vec<_>>>()?;
    Ok(FigureId::ALL
        .into_iter()
        .filter(|id| requested.contains(id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_and_file_names_are_unique() {
        let entries = catalog();
        assert_eq!(entries.len(), FigureId::ALL.len());
        let mut files: Vec<_> = entries.values().map(|entry| entry.file_name).collect();
        files.sort_unstable();
        files.dedup();
        assert_eq!(files.len(), FigureId::ALL.len());
        assert!(files.iter().all(|name| name.ends_with(".png")));
    }

    #[test]
    fn parse_round_trips_and_rejects_unknown_ids() {
        for id in FigureId::ALL {
            assert_eq!(FigureId::parse(id.as_str()).unwrap(), id);
        }
        assert!(FigureId::parse("figure-99").is_err());
    }

    #[test]
    fn selection_keeps_catalog_order() {
        let picked = select(&["bos-system".to_owned(), "model-validation".to_owned()]).unwrap();
        assert_eq!(picked, vec![FigureId::ModelValidation, FigureId::BosSystem]);
        assert_eq!(select(&[]).unwrap().len(), 15);
    }

    #[test]
    fn context_noise_is_reproducible() {
        let context = FigureContext::new(7);
        let a = context.noise(3).uniform_vec(0.0, 1.0, 4);
        let b = context.noise(3).uniform_vec(0.0, 1.0, 4);
        let c = context.noise(4).uniform_vec(0.0, 1.0, 4);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
