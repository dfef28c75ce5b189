use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::state::App;
use crate::model::world::Outcome;
use crate::ui::renderer::FieldWidget;

impl App {
    pub fn draw(&mut self, f: &mut Frame) {
        let (field_w, field_h) = FieldWidget::size(&self.world);

        let main_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(field_w), Constraint::Min(24)])
            .split(f.area());

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(field_h), Constraint::Min(0)])
            .split(main_layout[0]);

        f.render_widget(FieldWidget::new(&self.world), left[0]);
        self.draw_event_log(f, left[1]);
        self.draw_sidebar(f, main_layout[1]);

        if let Some(outcome) = self.world.outcome {
            self.draw_outcome(f, outcome);
        }
        if self.show_help {
            self.draw_help(f);
        }
    }

    fn draw_sidebar(&self, f: &mut Frame, area: Rect) {
        let paused = if self.paused { "  [PAUSED]" } else { "" };
        let mut lines = vec![
            Line::from(format!("Frame  {}{paused}", self.frames)),
            Line::from(format!("Ammo   {}", self.world.ammo())),
            Line::from(format!("Queen  {}", self.world.queen_life())),
            Line::from(format!("Weapon {}", self.world.weapon().label())),
        ];
        if self.world.config.modes.unofficial {
            lines.push(Line::styled(
                "unofficial run",
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            // Official runs disclose what the stock started at.
            lines.push(Line::from(format!(
                "Start  {}",
                self.world.config.player.start_ammo
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "h for help",
            Style::default().fg(Color::DarkGray),
        ));

        let block = Block::default().borders(Borders::ALL).title(" status ");
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_event_log(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .event_log
            .iter()
            .rev()
            .take(area.height.saturating_sub(2) as usize)
            .map(|(msg, color)| Line::styled(msg.clone(), Style::default().fg(*color)))
            .collect();
        let block = Block::default().borders(Borders::ALL).title(" events ");
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_outcome(&self, f: &mut Frame, outcome: Outcome) {
        let (msg, color) = match outcome {
            Outcome::Victory => ("THE QUEEN IS SLAIN", Color::Green),
            Outcome::Defeat => ("OVERRUN", Color::Red),
        };
        let area = centered(f.area(), 30, 5);
        f.render_widget(Clear, area);
        let banner = Paragraph::new(vec![
            Line::from(""),
            Line::styled(
                msg,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Line::styled("Q to quit", Style::default().fg(Color::DarkGray)),
        ])
        .centered()
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(banner, area);
    }

    fn draw_help(&self, f: &mut Frame) {
        let lines = vec![
            Line::from("w a s d   move"),
            Line::from("i j k l   shoot up/left/down/right"),
            Line::from(""),
            Line::from("p  bullet (1)     b  bomber (7)"),
            Line::from("m  mine (3)       W  worker (5)"),
            Line::from("c  cannon (5)     x  armed worker (6)"),
            Line::from("=  wall (1)"),
            Line::from(""),
            Line::from(".  pause       Q  quit"),
        ];
        let area = centered(f.area(), 44, lines.len() as u16 + 2);
        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" keys ")),
            area,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
