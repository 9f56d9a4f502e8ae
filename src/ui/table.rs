use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::directory::User;

/// Render users as a text table for non-interactive output
pub fn users_table<'a>(users: impl IntoIterator<Item = &'a User>, color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Email", "Status"]);

    for user in users {
        let mut status = Cell::new(user.status_label());
        if color {
            status = status.fg(if user.active {
                Color::Green
            } else {
                Color::DarkGrey
            });
        }
        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(&user.name),
            Cell::new(&user.email),
            status,
        ]);
    }

    table
}
