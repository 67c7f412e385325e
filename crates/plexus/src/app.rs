//! Terminal host for the particle field.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use plexus_config::Config;
use plexus_core::Bounds;
use plexus_field::{DrawList, FieldSettings, FrameHost, ParticleField, Surface};
use ratatui::DefaultTerminal;

use crate::view::View;

/// Draw calls of the latest frame and whether there is room to draw them.
#[derive(Debug, Default)]
struct Stage {
    scene: DrawList,
    attached: bool,
}

impl Stage {
    fn new(bounds: Bounds) -> Self {
        let mut stage = Self::default();
        stage.set_bounds(bounds);
        stage
    }

    /// Track the canvas size. An empty canvas detaches and drops the last frame.
    fn set_bounds(&mut self, bounds: Bounds) {
        self.attached = !bounds.is_empty();
        if !self.attached {
            self.scene.clear();
        }
    }

    fn surface(&mut self) -> Option<&mut DrawList> {
        self.attached.then_some(&mut self.scene)
    }
}

/// The main application which holds the terminal and presentation state.
pub struct App {
    terminal: DefaultTerminal,
    stage: Stage,
    view: View,
    settings: FieldSettings,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(terminal: DefaultTerminal, config: &Config) -> color_eyre::Result<Self> {
        let size = terminal.size()?;
        let mut view = View {
            theme: config.theme,
            speed: config.speed,
            link_opacity: config.link_opacity,
            cell: (config.cell_width, config.cell_height),
            bounds: Default::default(),
        };
        view.bounds = view.field_bounds(size.width, size.height);
        Ok(Self {
            terminal,
            stage: Stage::new(view.bounds),
            view,
            settings: config.field_settings(),
        })
    }

    /// Run the animation until the user quits.
    pub fn run(mut self) -> color_eyre::Result<()> {
        let mut field = ParticleField::new(self.settings.clone(), self.view.bounds);
        let frames = field.run(&mut self)?;
        tracing::debug!(frames, "app exiting");
        Ok(())
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with the frame interval as timeout so the animation keeps ticking.
    fn handle_crossterm_events(&mut self, field: &mut ParticleField) -> color_eyre::Result<()> {
        if event::poll(self.view.speed.frame_interval())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key, field),
                Event::Resize(width, height) => self.on_resize(width, height, field),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, field: &mut ParticleField) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => field.stop(),
            (_, KeyCode::Char('c')) => {
                self.view.theme = self.view.theme.next();
                tracing::debug!(theme = self.view.theme.name(), "theme changed");
            }
            (_, KeyCode::Char('s')) => {
                self.view.speed = self.view.speed.next();
                tracing::debug!(speed = self.view.speed.name(), "speed changed");
            }
            (_, KeyCode::Char('r')) => field.respawn(),
            _ => {}
        }
    }

    fn on_resize(&mut self, width: u16, height: u16, field: &mut ParticleField) {
        let bounds = self.view.field_bounds(width, height);
        field.resize(bounds.width, bounds.height);
        self.stage.set_bounds(bounds);
    }
}

impl FrameHost for App {
    type Surface = DrawList;
    type Error = color_eyre::Report;

    fn begin_frame(&mut self, field: &mut ParticleField) -> color_eyre::Result<bool> {
        self.handle_crossterm_events(field)?;
        self.view.bounds = field.bounds();
        Ok(true)
    }

    fn surface(&mut self) -> Option<&mut DrawList> {
        self.stage.surface()
    }

    fn end_frame(&mut self) -> color_eyre::Result<()> {
        self.terminal
            .draw(|frame| self.view.render(frame, &self.stage.scene))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_core::{Particle, Vec2};
    use plexus_field::Surface;

    #[test]
    fn test_stage_detaches_on_empty_bounds() {
        let mut stage = Stage::new(Bounds::new(640.0, 368.0));
        let surface = stage.surface().unwrap();
        surface.draw_particle(&Particle::new(Vec2::new(5.0, 5.0), Vec2::ZERO, 1.0, 0.5));

        stage.set_bounds(Bounds::new(640.0, 0.0));
        assert!(stage.surface().is_none());
        assert!(stage.scene.is_empty());

        stage.set_bounds(Bounds::new(640.0, 368.0));
        assert!(stage.surface().is_some());
    }

    #[test]
    fn test_stage_starts_detached_without_room() {
        let mut stage = Stage::new(Bounds::new(0.0, 0.0));
        assert!(stage.surface().is_none());
    }
}
