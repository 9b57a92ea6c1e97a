// lumen-value - Source position and metadata carried by composite values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::rc::Rc;

use crate::error::Position;
use crate::map::{ArrayMap, safe_merge};

/// Position and metadata shared by every composite value.
///
/// Neither field takes part in equality or hashing.
#[derive(Debug, Clone, Default)]
pub struct Info {
    pub position: Option<Position>,
    pub meta: Option<Rc<ArrayMap>>,
}

impl Info {
    pub fn at(position: Position) -> Self {
        Info {
            position: Some(position),
            meta: None,
        }
    }

    /// A copy whose metadata is the current map merged with `meta`.
    /// Keys in `meta` override existing ones.
    #[must_use]
    pub fn with_meta(&self, meta: &ArrayMap) -> Info {
        Info {
            position: self.position,
            meta: safe_merge(self.meta.as_deref(), Some(meta)).map(Rc::new),
        }
    }
}

/// Values that carry an [`Info`] record.
///
/// `with_meta` never mutates the receiver; the result shares its payload.
pub trait Meta: Sized {
    fn info(&self) -> &Info;

    /// The same value with `info` replacing the current record.
    fn with_info(&self, info: Info) -> Self;

    fn meta(&self) -> Option<&ArrayMap> {
        self.info().meta.as_deref()
    }

    fn position(&self) -> Option<Position> {
        self.info().position
    }

    fn with_meta(&self, meta: &ArrayMap) -> Self {
        self.with_info(self.info().with_meta(meta))
    }
}
