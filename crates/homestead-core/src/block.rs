//! Block vocabulary understood by the habitability scanner.
//!
//! Terrain adapters translate their native block ids into [`BlockKind`].
//! Anything the adapter cannot name maps to [`BlockKind::Other`], which
//! the scanner treats as player-placed content.

/// The ore categories tracked by a habitability scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OreKind {
    /// Coal ore.
    Coal,
    /// Iron ore.
    Iron,
    /// Gold ore.
    Gold,
    /// Redstone ore.
    Redstone,
    /// Lapis lazuli ore.
    Lapis,
    /// Emerald ore.
    Emerald,
    /// Diamond ore.
    Diamond,
}

impl OreKind {
    /// Every ore kind, in report order.
    pub const ALL: [OreKind; 7] = [
        OreKind::Coal,
        OreKind::Iron,
        OreKind::Gold,
        OreKind::Redstone,
        OreKind::Lapis,
        OreKind::Emerald,
        OreKind::Diamond,
    ];

    /// Dense index into [`OreKind::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label used in scan logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Coal => "coal",
            Self::Iron => "iron",
            Self::Gold => "gold",
            Self::Redstone => "redstone",
            Self::Lapis => "lapis",
            Self::Emerald => "emerald",
            Self::Diamond => "diamond",
        }
    }
}

/// The scanner's four-way classification of a block, plus traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockClass {
    /// Open space the flood fill may expand through.
    Passable,
    /// A log; counts toward the wood total.
    Wood,
    /// An ore; counts toward that ore's total.
    Ore(OreKind),
    /// Naturally generated terrain or flora; no effect on the report.
    Natural,
    /// Anything else, taken as evidence of prior modification.
    Placed,
}

/// A single sampled block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    // ── Passable ────────────────────────────────────────────────
    /// Open air above ground.
    Air,
    /// Air generated inside caves.
    CaveAir,
    /// Bubble column in water.
    BubbleColumn,
    /// Any door, wooden or iron.
    Door,
    /// Any trapdoor, wooden or iron.
    Trapdoor,
    /// Ladder.
    Ladder,

    // ── Resources ───────────────────────────────────────────────
    /// Any log.
    Log,
    /// Any tracked ore.
    Ore(OreKind),

    // ── Natural terrain and flora ───────────────────────────────
    /// Stone.
    Stone,
    /// Granite.
    Granite,
    /// Diorite.
    Diorite,
    /// Andesite.
    Andesite,
    /// Dirt.
    Dirt,
    /// Coarse dirt.
    CoarseDirt,
    /// Podzol.
    Podzol,
    /// Grass block.
    GrassBlock,
    /// Gravel.
    Gravel,
    /// Sand.
    Sand,
    /// Sandstone.
    Sandstone,
    /// Clay.
    Clay,
    /// Terracotta of any colour.
    Terracotta,
    /// Water.
    Water,
    /// Lava.
    Lava,
    /// Ice.
    Ice,
    /// Packed ice.
    PackedIce,
    /// Snow layer or block.
    Snow,
    /// Obsidian.
    Obsidian,
    /// Bedrock.
    Bedrock,
    /// Mossy cobblestone (dungeons and boulders).
    MossyCobblestone,
    /// Leaves of any tree.
    Leaves,
    /// Short or tall grass and ferns.
    Grass,
    /// Any small or tall flower.
    Flower,
    /// Small mushroom.
    Mushroom,
    /// Huge mushroom block.
    MushroomBlock,
    /// Cactus.
    Cactus,
    /// Dead bush.
    DeadBush,
    /// Vine.
    Vine,
    /// Lily pad.
    LilyPad,
    /// Sugar cane.
    SugarCane,
    /// Seagrass, short or tall.
    Seagrass,
    /// Sea pickle.
    SeaPickle,
    /// Coral, coral block or coral fan.
    Coral,

    // ── Placed ──────────────────────────────────────────────────
    /// Planks.
    Planks,
    /// Plain cobblestone.
    Cobblestone,
    /// Glass.
    Glass,
    /// Torch.
    Torch,
    /// Any block the adapter has no name for.
    Other,

    /// Sentinel for a sample whose chunk was not loaded.
    Unloaded,
}

impl BlockKind {
    /// Classify this block for the flood fill.
    ///
    /// [`BlockKind::Unloaded`] classifies as [`BlockClass::Natural`]; the
    /// snapshot never hands it to the scanner, it reads as absent.
    pub const fn class(self) -> BlockClass {
        match self {
            Self::Air
            | Self::CaveAir
            | Self::BubbleColumn
            | Self::Door
            | Self::Trapdoor
            | Self::Ladder => BlockClass::Passable,

            Self::Log => BlockClass::Wood,
            Self::Ore(ore) => BlockClass::Ore(ore),

            Self::Stone
            | Self::Granite
            | Self::Diorite
            | Self::Andesite
            | Self::Dirt
            | Self::CoarseDirt
            | Self::Podzol
            | Self::GrassBlock
            | Self::Gravel
            | Self::Sand
            | Self::Sandstone
            | Self::Clay
            | Self::Terracotta
            | Self::Water
            | Self::Lava
            | Self::Ice
            | Self::PackedIce
            | Self::Snow
            | Self::Obsidian
            | Self::Bedrock
            | Self::MossyCobblestone
            | Self::Leaves
            | Self::Grass
            | Self::Flower
            | Self::Mushroom
            | Self::MushroomBlock
            | Self::Cactus
            | Self::DeadBush
            | Self::Vine
            | Self::LilyPad
            | Self::SugarCane
            | Self::Seagrass
            | Self::SeaPickle
            | Self::Coral
            | Self::Unloaded => BlockClass::Natural,

            Self::Planks | Self::Cobblestone | Self::Glass | Self::Torch | Self::Other => {
                BlockClass::Placed
            }
        }
    }

    /// Whether the flood fill may pass through this block.
    pub const fn is_passable(self) -> bool {
        matches!(self.class(), BlockClass::Passable)
    }
}
