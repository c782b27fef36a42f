use crate::domain::{Facet, FilterSelection, ListingTable};
use maud::{html, Markup};

/// The filter form. Submits back to `action` with `applied=1` so an emptied
/// multi-select stays empty instead of snapping back to "everything".
pub fn filter_sidebar(action: &str, table: &ListingTable, selection: &FilterSelection) -> Markup {
    let (lo, hi) = table.price_bounds().unwrap_or((0, 0));

    html! {
        form method="get" action=(action) class="filters" {
            input type="hidden" name="applied" value="1";

            (facet_select("Select a Country", Facet::Country, table, selection))
            (facet_select("Select Property_type", Facet::PropertyType, table, selection))
            (facet_select("Select Room_type", Facet::RoomType, table, selection))

            fieldset class="price-range" {
                legend { "Select Price" }
                label for="price_min" { "Min" }
                input type="number" id="price_min" name="price_min"
                    min=(lo) max=(hi) value=(selection.price_min);
                label for="price_max" { "Max" }
                input type="number" id="price_max" name="price_max"
                    min=(lo) max=(hi) value=(selection.price_max);
            }

            button type="submit" class="primary" { "Apply" }
            a href=(action) class="reset" { "Reset" }
        }
    }
}

fn facet_select(
    label: &str,
    facet: Facet,
    table: &ListingTable,
    selection: &FilterSelection,
) -> Markup {
    let name = facet.param();
    let chosen = selection.selected(facet);

    html! {
        label for=(name) { (label) }
        select id=(name) name=(name) multiple size="6" {
            @for value in table.distinct(facet) {
                option value=(value) selected[chosen.contains(&value)] { (value) }
            }
        }
    }
}
