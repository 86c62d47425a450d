use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::warn;

use crate::config::PresenterConfig;
use crate::foundation::error::{SlidesError, SlidesResult};
use crate::scene::object::SceneObject;
use crate::scene::stage::Stage;
use crate::script::step::{Script, ScriptStep};

/// One slide: an object catalog and the script that animates it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideDef {
    /// Display name, unique within the deck.
    pub name: String,
    /// Every object the script may put on stage.
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    /// Script.
    pub script: Script,
}

impl SlideDef {
    /// Slide with no objects.
    pub fn new(name: impl Into<String>, script: Script) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            script,
        }
    }

    /// Add a catalog object.
    pub fn object(mut self, obj: SceneObject) -> Self {
        self.objects.push(obj);
        self
    }

    /// Check object ids, shapes and script references.
    pub fn validate(&self) -> SlidesResult<()> {
        let at = |e: SlidesError| SlidesError::authoring(format!("slide '{}': {e}", self.name));
        if self.name.trim().is_empty() {
            return Err(SlidesError::authoring("slide name must be non-empty"));
        }
        let stage = Stage::new(&self.objects).map_err(at)?;
        self.script.validate(&stage).map_err(at)?;
        if !self.script.is_stepwise()
            && self
                .script
                .steps()
                .iter()
                .any(|s| matches!(s, ScriptStep::Subslide))
        {
            warn!(
                slide = %self.name,
                "single-shot script contains subslide steps; they will be ignored"
            );
        }
        Ok(())
    }
}

#[derive(serde::Deserialize)]
struct SlideshowDef {
    name: String,
    #[serde(default)]
    config: Option<PresenterConfig>,
    #[serde(default)]
    slides: Option<Vec<SlideDef>>,
}

/// A validated deck of slides.
#[derive(Clone, Debug, PartialEq)]
pub struct Slideshow {
    name: String,
    config: PresenterConfig,
    slides: Vec<SlideDef>,
}

impl Slideshow {
    /// Build and validate a deck.
    pub fn new(
        name: impl Into<String>,
        config: PresenterConfig,
        slides: Vec<SlideDef>,
    ) -> SlidesResult<Self> {
        let show = Self {
            name: name.into(),
            config,
            slides,
        };
        show.validate()?;
        Ok(show)
    }

    /// Parse and validate a JSON deck.
    pub fn from_reader<R: std::io::Read>(r: R) -> SlidesResult<Self> {
        let def: SlideshowDef = serde_json::from_reader(r)
            .map_err(|e| SlidesError::authoring(format!("parse slideshow JSON: {e}")))?;
        let slides = def.slides.ok_or_else(|| {
            SlidesError::authoring("slideshow must have a `slides` list with all of its slides")
        })?;
        Self::new(def.name, def.config.unwrap_or_default(), slides)
    }

    /// Parse and validate a JSON deck from disk.
    pub fn from_path(path: impl AsRef<Path>) -> SlidesResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SlidesError::authoring(format!("open slideshow JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the deck before anything renders.
    pub fn validate(&self) -> SlidesResult<()> {
        if self.slides.is_empty() {
            return Err(SlidesError::authoring(format!(
                "slideshow '{}' has an empty `slides` list",
                self.name
            )));
        }
        self.config.validate()?;
        let mut seen = std::collections::BTreeSet::new();
        for slide in &self.slides {
            slide.validate()?;
            if !seen.insert(slide.name.as_str()) {
                return Err(SlidesError::authoring(format!(
                    "duplicate slide name '{}'",
                    slide.name
                )));
            }
        }
        Ok(())
    }

    /// Deck name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effective configuration.
    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    /// Replace the configuration, e.g. after command-line overrides.
    pub fn set_config(&mut self, config: PresenterConfig) -> SlidesResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> &[SlideDef] {
        &self.slides
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slideshow/manifest.rs"]
mod tests;
