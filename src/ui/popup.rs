use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

const HINT: &str = " Press any key to close";

fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;
  Rect::new(x, y, width, height)
}

fn hint_line() -> Line<'static> {
  Line::from(Span::styled(HINT, Style::default().fg(Color::Indexed(241))))
}

pub fn render_help(entries: &[(String, String)], area: Rect, buf: &mut Buffer) {
  let width = 52.min(area.width.saturating_sub(4));
  // entries + blank + hint + borders
  let height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));

  if width < 10 || height < 5 {
    return;
  }

  let popup = centered(area, width, height);
  Clear.render(popup, buf);

  let key_style = Style::default()
    .fg(Color::Indexed(75))
    .add_modifier(Modifier::BOLD);
  let desc_style = Style::default().fg(Color::Indexed(252));

  let mut lines: Vec<Line> = entries
    .iter()
    .map(|(keys, desc)| {
      Line::from(vec![
        Span::styled(format!("  {keys:<18}"), key_style),
        Span::styled(desc.clone(), desc_style),
      ])
    })
    .collect();
  lines.push(Line::from(""));
  lines.push(hint_line());

  let block = Block::default()
    .borders(Borders::ALL)
    .title(" Help ")
    .border_style(Style::default().fg(Color::Indexed(245)))
    .style(Style::default().bg(Color::Indexed(235)));

  Paragraph::new(lines).block(block).render(popup, buf);
}

pub fn render_message(messages: &[String], area: Rect, buf: &mut Buffer) {
  let width = 60.min(area.width.saturating_sub(4));
  let inner_width = width.saturating_sub(2) as usize;

  // Estimate line count with word-wrapping
  let mut line_count: u16 = 0;
  for msg in messages {
    line_count += ((msg.len() / inner_width.max(1)) as u16) + 1;
  }
  // +2 for borders, +1 for hint line, +1 for blank line before hint
  let height = (line_count + 4).min(area.height.saturating_sub(2));

  if width < 10 || height < 3 {
    return;
  }

  let popup = centered(area, width, height);
  Clear.render(popup, buf);

  let is_error = messages.first().is_some_and(|m| m == "Errors:");
  let (title, border) = if is_error {
    (" Error ", Color::Indexed(167))
  } else {
    (" GFD ", Color::Indexed(75))
  };

  let mut lines: Vec<Line> = messages
    .iter()
    .map(|msg| {
      Line::from(Span::styled(
        format!(" {msg}"),
        Style::default().fg(Color::Indexed(252)),
      ))
    })
    .collect();
  lines.push(Line::from(""));
  lines.push(hint_line());

  let block = Block::default()
    .borders(Borders::ALL)
    .title(title)
    .border_style(Style::default().fg(border))
    .style(Style::default().bg(Color::Indexed(235)));

  Paragraph::new(lines)
    .block(block)
    .wrap(Wrap { trim: false })
    .render(popup, buf);
}
