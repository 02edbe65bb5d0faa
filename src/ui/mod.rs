pub mod file_list;
pub mod popup;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::view::{DrawRequest, PopupView, PromptLine};

pub fn draw(frame: &mut Frame, request: &DrawRequest) {
  let area = frame.area();

  // header, list, footer, prompt
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1),
      Constraint::Min(3),
      Constraint::Length(1),
      Constraint::Length(1),
    ])
    .split(area);

  render_header(&request.header, chunks[0], frame.buffer_mut());
  file_list::render_file_list(&request.title, &request.rows, chunks[1], frame.buffer_mut());
  render_footer(&request.footer, chunks[2], frame.buffer_mut());

  if let Some(prompt) = &request.prompt {
    render_prompt(prompt, chunks[3], frame.buffer_mut());
    if request.popup.is_none() {
      frame.set_cursor_position(Position::new(chunks[3].x + prompt.cursor_col, chunks[3].y));
    }
  }

  match &request.popup {
    Some(PopupView::Help(entries)) => popup::render_help(entries, area, frame.buffer_mut()),
    Some(PopupView::Message(lines)) => popup::render_message(lines, area, frame.buffer_mut()),
    None => {}
  }
}

fn render_header(header: &str, area: Rect, buf: &mut Buffer) {
  let line = Line::from(Span::styled(
    header.to_string(),
    Style::default()
      .fg(Color::Indexed(252))
      .add_modifier(Modifier::BOLD),
  ));
  Paragraph::new(line)
    .style(Style::default().bg(Color::Indexed(236)))
    .render(area, buf);
}

fn render_footer(footer: &str, area: Rect, buf: &mut Buffer) {
  let line = Line::from(Span::styled(footer.to_string(), Style::default().fg(Color::Indexed(150))));
  Paragraph::new(line)
    .style(Style::default().bg(Color::Indexed(236)))
    .render(area, buf);
}

fn render_prompt(prompt: &PromptLine, area: Rect, buf: &mut Buffer) {
  let line = Line::from(Span::styled(prompt.text.clone(), Style::default().fg(Color::Indexed(252))));
  Paragraph::new(line).render(area, buf);
}
