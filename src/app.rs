//! Application state and controller
//!
//! One [`AppState`] owns every collection and routes all mutation through
//! its methods; each mutating method persists the collections it touched.
//! Nothing else in the crate holds state, and nothing here blocks: the
//! controller is a synchronous, single-threaded facade over in-memory
//! vectors backed by the JSON store.

use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use crate::exampack::{self, ChecklistItem};
use crate::flashcards::{self, Card, Deck, Streak};
use crate::library::{self, Item, ItemKind, SearchHit};
use crate::mastery::MasteryMap;
use crate::quiz::{
    self, QuestionMix, SessionReport, SourceProvider, SourceScope, SourceText, TestSession,
};
use crate::storage::{ExportPayload, JsonStore, StorageError, EXPORT_VERSION};
use crate::tasks::{self, Priority, Todo};
use crate::timetable::{self, TimetableEntry};
use crate::units::Unit;

// Collection names in the JSON store
const UNITS: &str = "units";
const ITEMS: &str = "items";
const DECKS: &str = "decks";
const TODOS: &str = "todos";
const TIMETABLE: &str = "timetable";
const CHECKLIST: &str = "checklist";
const MASTERY: &str = "mastery";
const STREAK: &str = "streak";
const SELECTION: &str = "selection";

const ALL_COLLECTIONS: &[&str] = &[
    UNITS, ITEMS, DECKS, TODOS, TIMETABLE, CHECKLIST, MASTERY, STREAK, SELECTION,
];

/// Cards generated when building a deck from a library item.
const DECK_FROM_ITEM_LIMIT: usize = 28;

/// Concept cards added per "add concepts as cards" call.
const CONCEPT_CARD_LIMIT: usize = 12;

/// Requested test sizes are clamped into this range.
const TEST_COUNT_MIN: usize = 5;
const TEST_COUNT_MAX: usize = 50;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    #[error("Ambiguous unit name: {0}")]
    AmbiguousUnit(String),

    #[error("Deck not found: {0}")]
    DeckNotFound(String),

    #[error("Card not found in deck")]
    CardNotFound,

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Checklist template not found: {0}")]
    TemplateNotFound(String),

    #[error("No source material with text content in scope")]
    EmptyCorpus,

    #[error("Source material did not yield any questions")]
    EmptyBank,

    #[error("No pinned items in this unit")]
    NothingPinned,

    #[error("Unsupported export payload version {0}")]
    UnsupportedExport(u32),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Dashboard numbers for one unit.
#[derive(Debug, Clone)]
pub struct UnitStats {
    pub item_count: usize,
    pub due_count: usize,
    pub skill_count: usize,
    pub average_mastery: Option<i32>,
}

/// The whole application state, owned by the single controller.
pub struct AppState {
    store: JsonStore,
    units: Vec<Unit>,
    items: Vec<Item>,
    decks: Vec<Deck>,
    todos: Vec<Todo>,
    timetable: Vec<TimetableEntry>,
    checklist: Vec<ChecklistItem>,
    mastery: MasteryMap,
    streak: Streak,
    selection: Vec<Uuid>,
}

impl AppState {
    /// Load all collections from a store, falling back to empty state for
    /// anything missing or unreadable.
    pub fn load(store: JsonStore) -> Self {
        let units = store.load(UNITS, Vec::new());
        let items = store.load(ITEMS, Vec::new());
        let decks = store.load(DECKS, Vec::new());
        let todos = store.load(TODOS, Vec::new());
        let timetable = store.load(TIMETABLE, Vec::new());
        let checklist = store.load(CHECKLIST, Vec::new());
        let mastery = store.load(MASTERY, MasteryMap::default());
        let streak = store.load(STREAK, Streak::default());
        let selection = store.load(SELECTION, Vec::new());
        Self {
            store,
            units,
            items,
            decks,
            todos,
            timetable,
            checklist,
            mastery,
            streak,
            selection,
        }
    }

    /// Open the store at the default data directory.
    pub fn open_default() -> Result<Self> {
        let data_dir = JsonStore::default_data_dir()?;
        let store = JsonStore::new(data_dir);
        store.init()?;
        Ok(Self::load(store))
    }

    // ==================== Units ====================

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Seed a starting unit so every other operation has somewhere to live.
    pub fn ensure_default_unit(&mut self) -> Result<Uuid> {
        if self.units.is_empty() {
            let unit = Unit::new("General".to_string());
            let id = unit.id;
            self.units.push(unit);
            self.store.save(UNITS, &self.units)?;
            return Ok(id);
        }
        Ok(self.units[0].id)
    }

    pub fn add_unit(&mut self, name: &str) -> Result<Unit> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidOperation("unit name is required".into()));
        }
        let unit = Unit::new(name.to_string());
        self.units.push(unit.clone());
        self.store.save(UNITS, &self.units)?;
        Ok(unit)
    }

    /// Find a unit by name: exact match first, then unique
    /// case-insensitive prefix.
    pub fn find_unit(&self, name: &str) -> Result<&Unit> {
        let lowered = name.to_lowercase();
        if let Some(unit) = self.units.iter().find(|u| u.name.to_lowercase() == lowered) {
            return Ok(unit);
        }
        let matches: Vec<&Unit> = self
            .units
            .iter()
            .filter(|u| u.name.to_lowercase().starts_with(&lowered))
            .collect();
        match matches.len() {
            0 => Err(AppError::UnitNotFound(name.to_string())),
            1 => Ok(matches[0]),
            _ => Err(AppError::AmbiguousUnit(name.to_string())),
        }
    }

    pub fn unit_by_id(&self, unit_id: Uuid) -> Result<&Unit> {
        self.units
            .iter()
            .find(|u| u.id == unit_id)
            .ok_or_else(|| AppError::UnitNotFound(unit_id.to_string()))
    }

    // ==================== Library ====================

    pub fn items_for_unit(&self, unit_id: Uuid) -> Vec<&Item> {
        self.items.iter().filter(|i| i.unit_id == unit_id).collect()
    }

    /// Items for a unit filtered by kind and/or tag.
    pub fn filtered_items(
        &self,
        unit_id: Uuid,
        kind: Option<ItemKind>,
        tag: Option<&str>,
    ) -> Vec<&Item> {
        self.items_for_unit(unit_id)
            .into_iter()
            .filter(|i| kind.map_or(true, |k| i.kind == k))
            .filter(|i| tag.map_or(true, |t| i.tags.iter().any(|x| x == t)))
            .collect()
    }

    pub fn add_item(
        &mut self,
        unit_id: Uuid,
        title: &str,
        kind: ItemKind,
        tags: Vec<String>,
        content: String,
    ) -> Result<Item> {
        self.unit_by_id(unit_id)?;
        let item = Item::new(unit_id, title.to_string(), kind, tags, content);
        // Newest first, like the library listing expects
        self.items.insert(0, item.clone());
        self.store.save(ITEMS, &self.items)?;
        Ok(item)
    }

    pub fn item_by_id(&self, item_id: Uuid) -> Result<&Item> {
        self.items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::ItemNotFound(item_id.to_string()))
    }

    /// Find an item in a unit by title: exact, then unique prefix.
    pub fn find_item(&self, unit_id: Uuid, title: &str) -> Result<&Item> {
        let lowered = title.to_lowercase();
        let in_unit = self.items_for_unit(unit_id);
        if let Some(item) = in_unit
            .iter()
            .copied()
            .find(|i| i.title.to_lowercase() == lowered)
        {
            return Ok(item);
        }
        let matches: Vec<&Item> = in_unit
            .iter()
            .copied()
            .filter(|i| i.title.to_lowercase().starts_with(&lowered))
            .collect();
        match matches.len() {
            0 => Err(AppError::ItemNotFound(title.to_string())),
            1 => Ok(matches[0]),
            _ => Err(AppError::ItemNotFound(format!("ambiguous title: {}", title))),
        }
    }

    pub fn update_item_content(&mut self, item_id: Uuid, content: String) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::ItemNotFound(item_id.to_string()))?;
        item.content = content;
        self.store.save(ITEMS, &self.items)?;
        Ok(())
    }

    pub fn delete_item(&mut self, item_id: Uuid) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|i| i.id != item_id);
        if self.items.len() == before {
            return Err(AppError::ItemNotFound(item_id.to_string()));
        }
        self.selection.retain(|id| *id != item_id);
        self.store.save(ITEMS, &self.items)?;
        self.store.save(SELECTION, &self.selection)?;
        Ok(())
    }

    pub fn toggle_pin(&mut self, item_id: Uuid) -> Result<bool> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::ItemNotFound(item_id.to_string()))?;
        item.pinned = !item.pinned;
        let pinned = item.pinned;
        self.store.save(ITEMS, &self.items)?;
        Ok(pinned)
    }

    /// Sorted, deduplicated tags across a unit's items.
    pub fn unit_tags(&self, unit_id: Uuid) -> Vec<String> {
        let mut tags: Vec<String> = self
            .items_for_unit(unit_id)
            .iter()
            .flat_map(|i| i.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        library::search_items(&self.items, query)
    }

    pub fn summarize_item(&self, item_id: Uuid, top_n: usize) -> Result<Vec<String>> {
        let item = self.item_by_id(item_id)?;
        Ok(quiz::summarize(&item.content, top_n))
    }

    // ==================== Test selection ====================

    /// Toggle an item's membership in the "selected for test" set.
    pub fn toggle_selected(&mut self, item_id: Uuid) -> Result<bool> {
        self.item_by_id(item_id)?;
        let selected = if let Some(pos) = self.selection.iter().position(|id| *id == item_id) {
            self.selection.remove(pos);
            false
        } else {
            self.selection.push(item_id);
            true
        };
        self.store.save(SELECTION, &self.selection)?;
        Ok(selected)
    }

    pub fn selected_ids(&self) -> &[Uuid] {
        &self.selection
    }

    pub fn clear_selection(&mut self) -> Result<()> {
        self.selection.clear();
        self.store.save(SELECTION, &self.selection)?;
        Ok(())
    }

    // ==================== Decks and review ====================

    pub fn decks_for_unit(&self, unit_id: Uuid) -> Vec<&Deck> {
        self.decks.iter().filter(|d| d.unit_id == unit_id).collect()
    }

    /// Seed a starting deck for a unit.
    pub fn ensure_default_deck(&mut self, unit_id: Uuid) -> Result<Uuid> {
        if let Some(deck) = self.decks.iter().find(|d| d.unit_id == unit_id) {
            return Ok(deck.id);
        }
        let deck = Deck::new(unit_id, "General".to_string());
        let id = deck.id;
        self.decks.push(deck);
        self.store.save(DECKS, &self.decks)?;
        Ok(id)
    }

    pub fn add_deck(&mut self, unit_id: Uuid, name: &str) -> Result<Deck> {
        self.unit_by_id(unit_id)?;
        let deck = Deck::new(unit_id, name.to_string());
        self.decks.push(deck.clone());
        self.store.save(DECKS, &self.decks)?;
        Ok(deck)
    }

    pub fn delete_deck(&mut self, deck_id: Uuid) -> Result<()> {
        let before = self.decks.len();
        self.decks.retain(|d| d.id != deck_id);
        if self.decks.len() == before {
            return Err(AppError::DeckNotFound(deck_id.to_string()));
        }
        self.store.save(DECKS, &self.decks)?;
        Ok(())
    }

    pub fn deck_by_id(&self, deck_id: Uuid) -> Result<&Deck> {
        self.decks
            .iter()
            .find(|d| d.id == deck_id)
            .ok_or_else(|| AppError::DeckNotFound(deck_id.to_string()))
    }

    /// Find a deck in a unit by name: exact, then unique prefix.
    pub fn find_deck(&self, unit_id: Uuid, name: &str) -> Result<&Deck> {
        let lowered = name.to_lowercase();
        let in_unit = self.decks_for_unit(unit_id);
        if let Some(deck) = in_unit
            .iter()
            .copied()
            .find(|d| d.name.to_lowercase() == lowered)
        {
            return Ok(deck);
        }
        let matches: Vec<&Deck> = in_unit
            .iter()
            .copied()
            .filter(|d| d.name.to_lowercase().starts_with(&lowered))
            .collect();
        match matches.len() {
            0 => Err(AppError::DeckNotFound(name.to_string())),
            1 => Ok(matches[0]),
            _ => Err(AppError::DeckNotFound(format!("ambiguous name: {}", name))),
        }
    }

    pub fn add_card(&mut self, deck_id: Uuid, front: &str, back: &str) -> Result<Card> {
        if front.trim().is_empty() || back.trim().is_empty() {
            return Err(AppError::InvalidOperation(
                "both front and back are required".into(),
            ));
        }
        let deck = self
            .decks
            .iter_mut()
            .find(|d| d.id == deck_id)
            .ok_or_else(|| AppError::DeckNotFound(deck_id.to_string()))?;
        let card = Card::new(front.trim().to_string(), back.trim().to_string());
        deck.cards.push(card.clone());
        self.store.save(DECKS, &self.decks)?;
        Ok(card)
    }

    /// Build a new deck of cloze cards from a library item's text.
    pub fn create_deck_from_item(&mut self, item_id: Uuid, name: Option<&str>) -> Result<Deck> {
        let item = self.item_by_id(item_id)?;
        let deck_name = name
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} — deck", item.title));
        let pairs = quiz::make_cloze_cards(&item.content, DECK_FROM_ITEM_LIMIT);

        let mut deck = Deck::new(item.unit_id, deck_name);
        deck.cards = pairs
            .into_iter()
            .map(|(front, back)| Card::new(front, back))
            .collect();
        self.decks.push(deck.clone());
        self.store.save(DECKS, &self.decks)?;
        Ok(deck)
    }

    /// Append "Define:" cards for an item's extracted concepts to a deck.
    pub fn add_concept_cards(&mut self, deck_id: Uuid, item_id: Uuid) -> Result<usize> {
        let item = self.item_by_id(item_id)?;
        let pairs = quiz::make_concept_cards(&item.content, CONCEPT_CARD_LIMIT);
        if pairs.is_empty() {
            return Err(AppError::InvalidOperation(
                "no concepts could be extracted from this item".into(),
            ));
        }
        let deck = self
            .decks
            .iter_mut()
            .find(|d| d.id == deck_id)
            .ok_or_else(|| AppError::DeckNotFound(deck_id.to_string()))?;
        let added = pairs.len();
        deck.cards
            .extend(pairs.into_iter().map(|(front, back)| Card::new(front, back)));
        self.store.save(DECKS, &self.decks)?;
        Ok(added)
    }

    /// Record one review outcome: Leitner reschedule plus a streak bump.
    pub fn review_card(
        &mut self,
        deck_id: Uuid,
        card_id: Uuid,
        correct: bool,
        today: NaiveDate,
    ) -> Result<Card> {
        let deck = self
            .decks
            .iter_mut()
            .find(|d| d.id == deck_id)
            .ok_or_else(|| AppError::DeckNotFound(deck_id.to_string()))?;
        let card = deck
            .cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or(AppError::CardNotFound)?;

        flashcards::reschedule(card, correct, today);
        let updated = card.clone();

        flashcards::bump_streak(&mut self.streak, today);
        self.store.save(DECKS, &self.decks)?;
        self.store.save(STREAK, &self.streak)?;
        Ok(updated)
    }

    /// Total due cards across a unit's decks.
    pub fn due_count_for_unit(&self, unit_id: Uuid, today: NaiveDate) -> usize {
        self.decks_for_unit(unit_id)
            .iter()
            .map(|d| flashcards::due_cards(d, today).len())
            .sum()
    }

    pub fn streak(&self) -> &Streak {
        &self.streak
    }

    // ==================== Tests ====================

    /// Start a test session over the scoped corpus.
    ///
    /// Rejected (with no state change) when the scope has no usable text or
    /// the generated bank is empty.
    pub fn start_test(
        &self,
        scope: &SourceScope,
        count: usize,
        mix: QuestionMix,
        rng: &mut impl Rng,
    ) -> Result<TestSession> {
        let sources = self.sources(scope);
        if sources.is_empty() {
            return Err(AppError::EmptyCorpus);
        }
        let bank = quiz::build_question_bank(&sources, rng);
        if bank.is_empty() {
            return Err(AppError::EmptyBank);
        }
        let count = count.clamp(TEST_COUNT_MIN, TEST_COUNT_MAX);
        let questions = quiz::select_questions(&bank, count, mix, rng);
        Ok(TestSession::new(questions))
    }

    /// Apply a finished session: one streak bump and a uniform mastery
    /// delta across every touched tag.
    pub fn finish_test(
        &mut self,
        unit_id: Uuid,
        report: &SessionReport,
        today: NaiveDate,
    ) -> Result<()> {
        flashcards::bump_streak(&mut self.streak, today);
        self.mastery
            .adjust(unit_id, &report.touched_tags, report.mastery_delta);
        self.store.save(STREAK, &self.streak)?;
        self.store.save(MASTERY, &self.mastery)?;
        Ok(())
    }

    pub fn mastery(&self) -> &MasteryMap {
        &self.mastery
    }

    // ==================== Tasks ====================

    /// A unit's todos, pending before done, otherwise in insertion order.
    pub fn todos_for_unit(&self, unit_id: Uuid) -> Vec<&Todo> {
        let mut todos: Vec<&Todo> = self.todos.iter().filter(|t| t.unit_id == unit_id).collect();
        todos.sort_by_key(|t| t.done);
        todos
    }

    pub fn add_todo(
        &mut self,
        unit_id: Uuid,
        text: &str,
        priority: Priority,
        due: Option<NaiveDate>,
    ) -> Result<Todo> {
        self.unit_by_id(unit_id)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidOperation("task text is required".into()));
        }
        let todo = Todo::new(unit_id, text.to_string(), priority, due);
        self.todos.insert(0, todo.clone());
        self.store.save(TODOS, &self.todos)?;
        Ok(todo)
    }

    pub fn toggle_todo(&mut self, todo_id: Uuid) -> Result<bool> {
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == todo_id)
            .ok_or_else(|| AppError::InvalidOperation(format!("no task {}", todo_id)))?;
        todo.done = !todo.done;
        let done = todo.done;
        self.store.save(TODOS, &self.todos)?;
        Ok(done)
    }

    pub fn remove_todo(&mut self, todo_id: Uuid) -> Result<()> {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != todo_id);
        if self.todos.len() == before {
            return Err(AppError::InvalidOperation(format!("no task {}", todo_id)));
        }
        self.store.save(TODOS, &self.todos)?;
        Ok(())
    }

    /// Rotating study plan over a unit's pending tasks.
    pub fn plan_for_unit(&self, unit_id: Uuid, days: usize) -> Vec<String> {
        let pending: Vec<&Todo> = self
            .todos
            .iter()
            .filter(|t| t.unit_id == unit_id && !t.done)
            .collect();
        tasks::generate_plan(&pending, days)
    }

    // ==================== Timetable ====================

    pub fn add_timetable_entry(
        &mut self,
        unit_id: Uuid,
        date: NaiveDate,
        time: &str,
        activity: &str,
    ) -> Result<TimetableEntry> {
        self.unit_by_id(unit_id)?;
        if time.trim().is_empty() || activity.trim().is_empty() {
            return Err(AppError::InvalidOperation(
                "date, time and activity are all required".into(),
            ));
        }
        let entry = TimetableEntry::new(
            unit_id,
            date,
            time.trim().to_string(),
            activity.trim().to_string(),
        );
        self.timetable.push(entry.clone());
        self.store.save(TIMETABLE, &self.timetable)?;
        Ok(entry)
    }

    pub fn agenda(&self, unit_id: Uuid) -> Vec<&TimetableEntry> {
        timetable::sorted_agenda(&self.timetable, unit_id)
    }

    pub fn month_entries(&self, unit_id: Uuid, year: i32, month: u32) -> Vec<&TimetableEntry> {
        timetable::entries_for_month(&self.timetable, unit_id, year, month)
    }

    // ==================== Exam pack ====================

    pub fn checklist_for_unit(&self, unit_id: Uuid) -> Vec<&ChecklistItem> {
        self.checklist
            .iter()
            .filter(|c| c.unit_id == unit_id)
            .collect()
    }

    pub fn add_checklist_item(&mut self, unit_id: Uuid, text: &str) -> Result<ChecklistItem> {
        self.unit_by_id(unit_id)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidOperation("checklist text is required".into()));
        }
        let item = ChecklistItem::new(unit_id, text.to_string());
        self.checklist.insert(0, item.clone());
        self.store.save(CHECKLIST, &self.checklist)?;
        Ok(item)
    }

    pub fn toggle_checklist_item(&mut self, item_id: Uuid) -> Result<bool> {
        let item = self
            .checklist
            .iter_mut()
            .find(|c| c.id == item_id)
            .ok_or_else(|| AppError::InvalidOperation(format!("no checklist item {}", item_id)))?;
        item.done = !item.done;
        let done = item.done;
        self.store.save(CHECKLIST, &self.checklist)?;
        Ok(done)
    }

    pub fn remove_checklist_item(&mut self, item_id: Uuid) -> Result<()> {
        let before = self.checklist.len();
        self.checklist.retain(|c| c.id != item_id);
        if self.checklist.len() == before {
            return Err(AppError::InvalidOperation(format!(
                "no checklist item {}",
                item_id
            )));
        }
        self.store.save(CHECKLIST, &self.checklist)?;
        Ok(())
    }

    /// Insert every entry of a named template into a unit's checklist.
    pub fn apply_checklist_template(&mut self, unit_id: Uuid, name: &str) -> Result<usize> {
        self.unit_by_id(unit_id)?;
        let template = exampack::find_template(name)
            .ok_or_else(|| AppError::TemplateNotFound(name.to_string()))?;
        for entry in template.entries {
            self.checklist
                .insert(0, ChecklistItem::new(unit_id, entry.to_string()));
        }
        self.store.save(CHECKLIST, &self.checklist)?;
        Ok(template.entries.len())
    }

    pub fn pinned_items(&self, unit_id: Uuid) -> Vec<&Item> {
        self.items_for_unit(unit_id)
            .into_iter()
            .filter(|i| i.pinned)
            .collect()
    }

    /// Render the unit's pinned items as an exportable revision pack.
    pub fn export_pack(&self, unit_id: Uuid) -> Result<String> {
        let pinned = self.pinned_items(unit_id);
        if pinned.is_empty() {
            return Err(AppError::NothingPinned);
        }
        Ok(exampack::build_pack(&pinned))
    }

    pub fn unpin_all(&mut self, unit_id: Uuid) -> Result<()> {
        for item in self.items.iter_mut().filter(|i| i.unit_id == unit_id) {
            item.pinned = false;
        }
        self.store.save(ITEMS, &self.items)?;
        Ok(())
    }

    // ==================== Stats ====================

    pub fn unit_stats(&self, unit_id: Uuid, today: NaiveDate) -> UnitStats {
        UnitStats {
            item_count: self.items_for_unit(unit_id).len(),
            due_count: self.due_count_for_unit(unit_id, today),
            skill_count: self.mastery.skill_count(unit_id),
            average_mastery: self.mastery.average(unit_id),
        }
    }

    /// Dashboard rows for every unit.
    pub fn overview(&self, today: NaiveDate) -> Vec<(&Unit, UnitStats)> {
        self.units
            .iter()
            .map(|u| (u, self.unit_stats(u.id, today)))
            .collect()
    }

    // ==================== Export / import / wipe ====================

    pub fn export_payload(&self) -> ExportPayload {
        ExportPayload {
            version: EXPORT_VERSION,
            exported_at: chrono::Utc::now(),
            units: self.units.clone(),
            items: self.items.clone(),
            decks: self.decks.clone(),
            todos: self.todos.clone(),
            timetable: self.timetable.clone(),
            checklist: self.checklist.clone(),
            mastery: self.mastery.clone(),
            streak: self.streak.clone(),
        }
    }

    /// Replace the whole state with an imported payload and persist it.
    pub fn import_payload(&mut self, payload: ExportPayload) -> Result<()> {
        if !payload.is_supported() {
            return Err(AppError::UnsupportedExport(payload.version));
        }
        self.units = payload.units;
        self.items = payload.items;
        self.decks = payload.decks;
        self.todos = payload.todos;
        self.timetable = payload.timetable;
        self.checklist = payload.checklist;
        self.mastery = payload.mastery;
        self.streak = payload.streak;
        self.selection.clear();
        self.save_all()
    }

    /// Delete every stored collection and reset in-memory state.
    pub fn wipe(&mut self) -> Result<()> {
        self.store.wipe(ALL_COLLECTIONS)?;
        self.units.clear();
        self.items.clear();
        self.decks.clear();
        self.todos.clear();
        self.timetable.clear();
        self.checklist.clear();
        self.mastery = MasteryMap::default();
        self.streak = Streak::default();
        self.selection.clear();
        Ok(())
    }

    fn save_all(&self) -> Result<()> {
        self.store.save(UNITS, &self.units)?;
        self.store.save(ITEMS, &self.items)?;
        self.store.save(DECKS, &self.decks)?;
        self.store.save(TODOS, &self.todos)?;
        self.store.save(TIMETABLE, &self.timetable)?;
        self.store.save(CHECKLIST, &self.checklist)?;
        self.store.save(MASTERY, &self.mastery)?;
        self.store.save(STREAK, &self.streak)?;
        self.store.save(SELECTION, &self.selection)?;
        Ok(())
    }
}

impl SourceProvider for AppState {
    /// Adapt library items in scope into the generator's canonical source
    /// shape. Items without usable text are dropped here, so the generator
    /// only ever sees real content.
    fn sources(&self, scope: &SourceScope) -> Vec<SourceText> {
        let items = match scope {
            SourceScope::Unit(unit_id) => self.items_for_unit(*unit_id),
            SourceScope::Tag(unit_id, tag) => {
                self.filtered_items(*unit_id, None, Some(tag.as_str()))
            }
            SourceScope::Selected(unit_id, ids) => self
                .items_for_unit(*unit_id)
                .into_iter()
                .filter(|i| ids.contains(&i.id))
                .collect(),
        };
        items
            .into_iter()
            .filter(|i| !i.content.trim().is_empty())
            .map(|i| SourceText {
                id: Some(i.id),
                title: i.title.clone(),
                tags: i.tags.clone(),
                content: i.content.clone(),
            })
            .collect()
    }
}
