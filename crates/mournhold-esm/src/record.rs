//! Decoded records.

use mournhold_common::Tag;

use crate::field::RecordBody;
use crate::header::{RecordFlags, RecordHeader};
use crate::records::*;
use crate::RecordKind;

/// A decoded record: its header, where it was found, and its typed payload.
#[derive(Debug, Clone)]
pub struct Record {
    kind: RecordKind,
    header: RecordHeader,
    offset: usize,
    deleted_marker: bool,
    data: RecordData,
}

impl Record {
    pub(crate) fn new(
        kind: RecordKind,
        header: RecordHeader,
        offset: usize,
        deleted_marker: bool,
        data: RecordData,
    ) -> Self {
        Self {
            kind,
            header,
            offset,
            deleted_marker,
            data,
        }
    }

    /// Get the record kind.
    #[inline]
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Get the record tag as it appeared in the file.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.header.tag
    }

    /// Get the record header.
    #[inline]
    pub fn header(&self) -> &RecordHeader {
        &self.header
    }

    /// Get the record flags.
    #[inline]
    pub fn flags(&self) -> RecordFlags {
        self.header.flags()
    }

    /// Stream offset of the record header.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Check if the record is marked deleted, by header flag or `DELE` sub-record.
    pub fn is_deleted(&self) -> bool {
        self.deleted_marker
            || self.data.is_deleted()
            || self.flags().contains(RecordFlags::DELETED)
    }

    /// Get the typed payload.
    #[inline]
    pub fn data(&self) -> &RecordData {
        &self.data
    }

    /// Borrow the payload as a specific record body.
    ///
    /// ```no_run
    /// use mournhold_esm::{EsmFile, records::NpcRecord};
    ///
    /// let esm = EsmFile::open("Morrowind.esm")?;
    /// if let Some(npc) = esm.object_by_id("fargoth").and_then(|r| r.get::<NpcRecord>()) {
    ///     println!("{} is a {}", npc.id, npc.race.as_deref().unwrap_or("?"));
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn get<T: RecordBody>(&self) -> Option<&T> {
        T::from_data(&self.data)
    }

    /// The game-object identifier this record is indexed under, if any.
    pub fn id(&self) -> Option<&str> {
        self.data.id().filter(|id| !id.is_empty())
    }
}

/// Typed record payloads, one variant per record kind.
#[derive(Debug, Clone)]
pub enum RecordData {
    Tes3(Tes3Record),
    GameSetting(GameSettingRecord),
    Global(GlobalRecord),
    Class(ClassRecord),
    Faction(FactionRecord),
    Race(RaceRecord),
    Sound(SoundRecord),
    Skill(SkillRecord),
    MagicEffect(MagicEffectRecord),
    Script(ScriptRecord),
    Region(RegionRecord),
    Birthsign(BirthsignRecord),
    LandTexture(LandTextureRecord),
    Static(StaticRecord),
    Door(DoorRecord),
    MiscItem(MiscItemRecord),
    Weapon(WeaponRecord),
    Container(ContainerRecord),
    Spell(SpellRecord),
    Creature(CreatureRecord),
    BodyPart(BodyPartRecord),
    Light(LightRecord),
    Enchantment(EnchantmentRecord),
    Npc(NpcRecord),
    Armor(ArmorRecord),
    Clothing(ClothingRecord),
    RepairTool(RepairToolRecord),
    Activator(ActivatorRecord),
    Apparatus(ApparatusRecord),
    Lockpick(LockpickRecord),
    Probe(ProbeRecord),
    Ingredient(IngredientRecord),
    Book(BookRecord),
    Potion(PotionRecord),
    LeveledItem(LeveledItemRecord),
    LeveledCreature(LeveledCreatureRecord),
    Cell(CellRecord),
    Land(LandRecord),
    PathGrid(PathGridRecord),
    SoundGenerator(SoundGeneratorRecord),
    Dialogue(DialogueRecord),
    DialogueInfo(DialogueInfoRecord),
}

/// Evaluate an expression against whichever body a `RecordData` holds.
macro_rules! with_body {
    ($data:expr, $body:ident => $expr:expr) => {
        match $data {
            RecordData::Tes3($body) => $expr,
            RecordData::GameSetting($body) => $expr,
            RecordData::Global($body) => $expr,
            RecordData::Class($body) => $expr,
            RecordData::Faction($body) => $expr,
            RecordData::Race($body) => $expr,
            RecordData::Sound($body) => $expr,
            RecordData::Skill($body) => $expr,
            RecordData::MagicEffect($body) => $expr,
            RecordData::Script($body) => $expr,
            RecordData::Region($body) => $expr,
            RecordData::Birthsign($body) => $expr,
            RecordData::LandTexture($body) => $expr,
            RecordData::Static($body) => $expr,
            RecordData::Door($body) => $expr,
            RecordData::MiscItem($body) => $expr,
            RecordData::Weapon($body) => $expr,
            RecordData::Container($body) => $expr,
            RecordData::Spell($body) => $expr,
            RecordData::Creature($body) => $expr,
            RecordData::BodyPart($body) => $expr,
            RecordData::Light($body) => $expr,
            RecordData::Enchantment($body) => $expr,
            RecordData::Npc($body) => $expr,
            RecordData::Armor($body) => $expr,
            RecordData::Clothing($body) => $expr,
            RecordData::RepairTool($body) => $expr,
            RecordData::Activator($body) => $expr,
            RecordData::Apparatus($body) => $expr,
            RecordData::Lockpick($body) => $expr,
            RecordData::Probe($body) => $expr,
            RecordData::Ingredient($body) => $expr,
            RecordData::Book($body) => $expr,
            RecordData::Potion($body) => $expr,
            RecordData::LeveledItem($body) => $expr,
            RecordData::LeveledCreature($body) => $expr,
            RecordData::Cell($body) => $expr,
            RecordData::Land($body) => $expr,
            RecordData::PathGrid($body) => $expr,
            RecordData::SoundGenerator($body) => $expr,
            RecordData::Dialogue($body) => $expr,
            RecordData::DialogueInfo($body) => $expr,
        }
    };
}

impl RecordData {
    /// Get the kind of the payload.
    pub fn kind(&self) -> RecordKind {
        with_body!(self, body => body_kind(body))
    }

    /// The game-object identifier of the payload, if its kind has one.
    pub fn id(&self) -> Option<&str> {
        with_body!(self, body => body.id())
    }

    /// Check if the body itself carries a deletion marker.
    pub fn is_deleted(&self) -> bool {
        with_body!(self, body => body.is_deleted())
    }
}

fn body_kind<T: RecordBody>(_: &T) -> RecordKind {
    T::KIND
}
