use itertools::Itertools;
use serde_json::Value as JsonValue;

use crate::{
    cell::{Cell, Person, decode_list},
    column_type::{ColDef, ColumnKind, ColumnType, PersonChip, RenderStyle, RenderedCell},
    config::FormatContext,
    sort::SortKey,
};

const PEOPLE_SEPARATOR: &str = ", ";

/// Lists of people (subjects, assignees). The column aggregates everyone,
/// so the canonical text joins all names in input order.
#[derive(Debug, Default, Clone, Copy)]
pub struct PeopleColumnType;

fn people_of(cell: &Cell) -> &[Person] {
    match cell {
        Cell::People(people) => people,
        _ => &[],
    }
}

impl ColumnType for PeopleColumnType {
    fn kind(&self) -> ColumnKind {
        ColumnKind::People
    }

    fn decode(&self, raw: Option<&JsonValue>) -> Cell {
        match raw.and_then(decode_list::<Person>) {
            Some(people) if !people.is_empty() => Cell::People(people),
            _ => Cell::Empty,
        }
    }

    fn cell_to_string(&self, cell: &Cell) -> String {
        people_of(cell)
            .iter()
            .map(Person::display_name)
            .join(PEOPLE_SEPARATOR)
    }

    fn searchable_strings(&self, cell: &Cell) -> Vec<String> {
        people_of(cell).iter().map(Person::display_name).collect()
    }

    fn sort_key(&self, cell: &Cell) -> SortKey {
        SortKey::text(self.cell_to_string(cell))
    }

    fn col_def(&self, _ctx: &FormatContext) -> ColDef {
        ColDef {
            render: RenderStyle::PersonChips,
            filterable: false,
            ..ColDef::default()
        }
    }

    fn render(&self, cell: &Cell, ctx: &FormatContext) -> RenderedCell {
        let people = people_of(cell);
        if people.is_empty() {
            return RenderedCell::Empty;
        }
        RenderedCell::People(
            people
                .iter()
                .map(|person| PersonChip {
                    id: person.id,
                    name: person.display_name(),
                    show_text: ctx.config.show_person_names,
                })
                .collect(),
        )
    }
}
