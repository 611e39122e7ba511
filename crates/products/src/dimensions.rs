use feedforge_builder::{Args, FieldTarget};
use feedforge_core::{Distance, FeedError, FeedResult, Weight};
use feedforge_document::Emitter;

const DIMENSION_FIELDS: &[&str] = &["length", "width", "height", "weight"];

/// Item or package measurements. Every part is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions {
    length: Option<Distance>,
    width: Option<Distance>,
    height: Option<Distance>,
    weight: Option<Weight>,
}

impl Dimensions {
    pub fn length(&self) -> Option<Distance> {
        self.length
    }

    pub fn width(&self) -> Option<Distance> {
        self.width
    }

    pub fn height(&self) -> Option<Distance> {
        self.height
    }

    pub fn weight(&self) -> Option<Weight> {
        self.weight
    }

    /// Write `Length`, `Width`, `Height`, `Weight` unit nodes, skipping absent parts.
    pub fn write_body(&self, e: &mut Emitter<'_>) -> FeedResult<()> {
        for (tag, distance) in [("Length", &self.length), ("Width", &self.width), ("Height", &self.height)] {
            if let Some(distance) = distance {
                e.emit_unit(tag, distance)?;
            }
        }
        if let Some(weight) = &self.weight {
            e.emit_unit("Weight", weight)?;
        }
        Ok(())
    }
}

impl FieldTarget for Dimensions {
    fn supports_field(&self, name: &str) -> bool {
        DIMENSION_FIELDS.contains(&name)
    }

    fn set_field(&mut self, name: &str, mut args: Args<'_>) -> FeedResult<()> {
        match name {
            "length" => self.length = Some(args.distance()?),
            "width" => self.width = Some(args.distance()?),
            "height" => self.height = Some(args.distance()?),
            "weight" => self.weight = Some(args.weight()?),
            _ => return Err(FeedError::unknown_field(name)),
        }
        args.finish()
    }
}
