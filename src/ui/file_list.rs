use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::batch::ActionTag;
use crate::view::{Row, RowClass};

pub fn row_style(class: RowClass) -> Style {
  match class {
    RowClass::Cursor => Style::default()
      .fg(Color::Indexed(234))
      .bg(Color::Indexed(75))
      .add_modifier(Modifier::BOLD),
    RowClass::Selected => Style::default()
      .fg(Color::Indexed(220))
      .add_modifier(Modifier::BOLD),
    RowClass::Marked(ActionTag::Copy) => Style::default().fg(Color::Indexed(114)),
    RowClass::Marked(ActionTag::Move) => Style::default().fg(Color::Indexed(179)),
    RowClass::Marked(ActionTag::Delete) => Style::default()
      .fg(Color::Indexed(167))
      .add_modifier(Modifier::BOLD),
    RowClass::Directory => Style::default().fg(Color::Indexed(75)),
    RowClass::Symlink => Style::default().fg(Color::Indexed(80)),
    RowClass::Executable => Style::default().fg(Color::Indexed(150)),
    RowClass::Plain => Style::default().fg(Color::Indexed(252)),
  }
}

pub fn render_file_list(title: &str, rows: &[Row], area: Rect, buf: &mut Buffer) {
  let width = area.width.saturating_sub(2) as usize; // borders

  let lines: Vec<Line> = rows
    .iter()
    .map(|row| {
      let mut style = row_style(row.class);
      if row.cut && row.class != RowClass::Cursor {
        style = style.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT);
      }
      // The cursor bar spans the full width.
      let label = if row.class == RowClass::Cursor {
        format!("{:<width$}", row.label)
      } else {
        row.label.clone()
      };
      Line::from(Span::styled(label, style))
    })
    .collect();

  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Indexed(240)))
    .title(title.to_string())
    .title_style(Style::default().fg(Color::Indexed(75)));

  Paragraph::new(lines).block(block).render(area, buf);
}
