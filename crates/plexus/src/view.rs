//! Drawing a recorded frame onto the terminal.

use plexus_core::{AnimationSpeed, Bounds, ColorTheme};
use plexus_field::{DrawList, fade_with_floor};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    symbols::Marker,
    text::Line,
    widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points},
};

/// Particles at least this large are drawn as circles instead of dots.
const CIRCLE_RADIUS: f64 = 2.5;
/// Faintest brightness for links and particles.
const LINK_FLOOR: f64 = 0.12;
const PARTICLE_FLOOR: f64 = 0.35;

/// Presentation settings that can change while running.
#[derive(Debug, Clone)]
pub struct View {
    pub theme: ColorTheme,
    pub speed: AnimationSpeed,
    /// Opacity of the shortest link, used to normalize link brightness.
    pub link_opacity: f64,
    /// Pixel size of one terminal cell.
    pub cell: (f64, f64),
    /// Current field bounds.
    pub bounds: Bounds,
}

impl View {
    /// Split the terminal into the canvas and the help line.
    pub fn layout(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);
        (chunks[0], chunks[1])
    }

    /// Field bounds for a terminal of `width` × `height` cells.
    pub fn field_bounds(&self, width: u16, height: u16) -> Bounds {
        let (canvas, _) = Self::layout(Rect::new(0, 0, width, height));
        Bounds::new(
            canvas.width as f64 * self.cell.0,
            canvas.height as f64 * self.cell.1,
        )
    }

    /// Renders the scene and the help line.
    pub fn render(&self, frame: &mut Frame, scene: &DrawList) {
        let (canvas_area, help_area) = Self::layout(frame.area());
        // Nothing to draw into, and the scene may predate the shrink.
        if !self.bounds.is_empty() {
            self.render_canvas(frame, canvas_area, scene);
        }

        let accent = self.theme.particle_color();
        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "c".bold().fg(accent),
            format!(" theme ({})  ", self.theme.name()).dark_gray(),
            "s".bold().fg(accent),
            format!(" speed ({})  ", self.speed.name()).dark_gray(),
            "r".bold().fg(accent),
            format!(" respawn  {} particles", scene.particles().count()).dark_gray(),
        ])
        .centered();
        frame.render_widget(help, help_area);
    }

    fn render_canvas(&self, frame: &mut Frame, canvas_area: Rect, scene: &DrawList) {
        let height = self.bounds.height;
        let link_color = self.theme.line_color();
        let particle_color = self.theme.particle_color();
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(Color::Reset)
            .x_bounds([0.0, self.bounds.width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                // Canvas y grows upward, field y grows downward.
                for (from, to, alpha) in scene.links() {
                    let strength = self.link_strength(alpha);
                    if strength <= 0.0 {
                        continue;
                    }
                    ctx.draw(&CanvasLine::new(
                        from.x,
                        height - from.y,
                        to.x,
                        height - to.y,
                        fade_with_floor(link_color, strength, LINK_FLOOR),
                    ));
                }
                ctx.layer();
                for (position, radius, opacity) in scene.particles() {
                    let color = fade_with_floor(particle_color, opacity, PARTICLE_FLOOR);
                    let (x, y) = (position.x, height - position.y);
                    if radius >= CIRCLE_RADIUS {
                        ctx.draw(&Circle {
                            x,
                            y,
                            radius,
                            color,
                        });
                    } else {
                        ctx.draw(&Points {
                            coords: &[(x, y)],
                            color,
                        });
                    }
                }
            });
        frame.render_widget(canvas, canvas_area);
    }

    /// Link alpha rescaled to 0.0-1.0 relative to the strongest possible link.
    fn link_strength(&self, alpha: f64) -> f64 {
        if self.link_opacity > 0.0 {
            (alpha / self.link_opacity).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_core::{Particle, Vec2};
    use plexus_field::Surface;
    use ratatui::{Terminal, backend::TestBackend};

    fn view() -> View {
        View {
            theme: ColorTheme::Violet,
            speed: AnimationSpeed::Normal,
            link_opacity: 0.15,
            cell: (8.0, 16.0),
            bounds: Bounds::new(640.0, 368.0),
        }
    }

    #[test]
    fn test_field_bounds_excludes_help_line() {
        assert_eq!(view().field_bounds(80, 24), Bounds::new(640.0, 368.0));
        assert_eq!(view().field_bounds(80, 1), Bounds::new(640.0, 0.0));
        assert_eq!(view().field_bounds(0, 0), Bounds::new(0.0, 0.0));
    }

    #[test]
    fn test_link_strength_normalized() {
        let view = view();
        assert_eq!(view.link_strength(0.15), 1.0);
        assert_eq!(view.link_strength(0.0), 0.0);
        assert!((view.link_strength(0.05) - 1.0 / 3.0).abs() < 1e-9);
        let silent = View {
            link_opacity: 0.0,
            ..view
        };
        assert_eq!(silent.link_strength(0.1), 0.0);
    }

    #[test]
    fn test_render_draws_help_line() {
        let mut scene = DrawList::new();
        scene.draw_particle(&Particle::new(Vec2::new(10.0, 10.0), Vec2::ZERO, 1.0, 0.6));
        scene.draw_particle(&Particle::new(Vec2::new(30.0, 20.0), Vec2::ZERO, 3.0, 0.6));
        scene.draw_link(Vec2::new(10.0, 10.0), Vec2::new(30.0, 20.0), 0.1);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| view().render(frame, &scene)).unwrap();

        let buffer = terminal.backend().buffer();
        let help: String = (0..80u16).map(|x| buffer[(x, 23u16)].symbol()).collect();
        assert!(help.contains("theme (violet)"));
        assert!(help.contains("2 particles"));
    }

    #[test]
    fn test_render_skips_canvas_without_room() {
        let mut scene = DrawList::new();
        scene.draw_particle(&Particle::new(Vec2::new(10.0, 10.0), Vec2::ZERO, 3.0, 0.6));
        let view = View {
            bounds: Bounds::new(640.0, 0.0),
            ..view()
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 3)).unwrap();
        terminal.draw(|frame| view.render(frame, &scene)).unwrap();

        let buffer = terminal.backend().buffer();
        for y in 0..2u16 {
            assert!((0..80u16).all(|x| buffer[(x, y)].symbol() == " "));
        }
    }
}
