use serde::{Deserialize, Serialize};

/// Paint passes of one chart frame, in the order they are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PaintPass {
    BelowIndicators,
    /// Candles and indicator lines. Drawn by the host, not modeled here.
    Board,
    AboveIndicators,
    Interaction,
}

impl PaintPass {
    #[must_use]
    pub const fn canonical_order() -> [PaintPass; 4] {
        [
            PaintPass::BelowIndicators,
            PaintPass::Board,
            PaintPass::AboveIndicators,
            PaintPass::Interaction,
        ]
    }
}

/// Layer an object model entry is painted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectLayer {
    BelowIndicators,
    AboveIndicators,
    /// User drawings, previews and selection highlights. Always topmost.
    Interaction,
}

impl ObjectLayer {
    #[must_use]
    pub const fn all() -> [ObjectLayer; 3] {
        [
            ObjectLayer::BelowIndicators,
            ObjectLayer::AboveIndicators,
            ObjectLayer::Interaction,
        ]
    }

    #[must_use]
    pub const fn paint_pass(self) -> PaintPass {
        match self {
            ObjectLayer::BelowIndicators => PaintPass::BelowIndicators,
            ObjectLayer::AboveIndicators => PaintPass::AboveIndicators,
            ObjectLayer::Interaction => PaintPass::Interaction,
        }
    }
}
