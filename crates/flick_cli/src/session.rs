//! Runs a gesture script against a virtual surface and records a trace

use std::sync::Arc;

use anyhow::Result;
use flick_charm::{FilterResult, FlickCharm, FlickConfig, ScrollableSurface, VirtualSurface};
use flick_core::events::event_types::{POINTER_DOWN, POINTER_MOVE, POINTER_UP};
use flick_core::events::{PointerButton, SurfaceId};
use flick_core::{Event, Point};
use parking_lot::Mutex;
use serde::Serialize;

use crate::script::{GestureScript, Step};

const SURFACE: SurfaceId = SurfaceId(1);

/// Upper bound on ticks run by `--settle`
const SETTLE_LIMIT: u32 = 10_000;

/// Engine and surface state after one script step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceLine {
    pub step: usize,
    pub action: String,
    /// "pass", "consumed" or "-" for ticks
    pub result: &'static str,
    pub state: String,
    pub offset: [i32; 2],
    pub velocity: [i32; 2],
    pub timer_active: bool,
    pub delivered: usize,
    pub clicks: usize,
}

/// A scripted session: one engine, one surface
pub struct Session {
    charm: FlickCharm,
    surface: Arc<Mutex<VirtualSurface>>,
    lines: Vec<TraceLine>,
}

impl Session {
    pub fn new(script: &GestureScript, config: FlickConfig) -> Result<Self> {
        let layout = &script.surface;
        let surface = Arc::new(Mutex::new(
            VirtualSurface::new(layout.max_x, layout.max_y)
                .with_offset(Point::new(layout.start_x, layout.start_y)),
        ));

        let mut charm = FlickCharm::with_config(config)?;
        charm.activate(SURFACE, surface.clone(), layout.axes)?;

        Ok(Self {
            charm,
            surface,
            lines: Vec::new(),
        })
    }

    /// Run every step, optionally ticking until the timer stops
    pub fn run(mut self, script: &GestureScript, settle: bool) -> Vec<TraceLine> {
        for (index, step) in script.steps.iter().enumerate() {
            let result = self.apply(*step);
            self.record(index + 1, step.label(), result);
        }

        // Replayed taps at the end of a script still reach the surface
        self.flush();

        if settle {
            let mut ticks = 0;
            while self.charm.is_timer_active() && ticks < SETTLE_LIMIT {
                self.charm.tick();
                ticks += 1;
            }
            if ticks == SETTLE_LIMIT {
                tracing::warn!("Surface still moving after {} ticks", SETTLE_LIMIT);
            }
            self.record(script.steps.len() + 1, format!("settle x{ticks}"), "-");
        }

        self.lines
    }

    fn apply(&mut self, step: Step) -> &'static str {
        let (event_type, x, y) = match step {
            Step::Press { x, y } => (POINTER_DOWN, x, y),
            Step::Move { x, y } => (POINTER_MOVE, x, y),
            Step::Release { x, y } => (POINTER_UP, x, y),
            Step::Tick { count } => {
                for _ in 0..count {
                    self.charm.tick();
                }
                return "-";
            }
        };

        self.flush();
        let event = Event::pointer(event_type, SURFACE, Point::new(x, y), PointerButton::Primary);
        self.route(&event)
    }

    fn flush(&mut self) {
        for replayed in self.charm.drain_synthetic() {
            tracing::debug!("Delivering replayed {:?}", replayed.event_type);
            self.route(&replayed);
        }
    }

    fn route(&mut self, event: &Event) -> &'static str {
        match self.charm.filter_event(event) {
            FilterResult::Pass => {
                self.surface.lock().deliver(event);
                "pass"
            }
            FilterResult::Consumed => "consumed",
        }
    }

    fn record(&mut self, step: usize, action: String, result: &'static str) {
        let surface = self.surface.lock();
        let offset = surface.scroll_offset();
        let velocity = self.charm.velocity(SURFACE).unwrap_or(Point::ZERO);
        let state = self
            .charm
            .state(SURFACE)
            .map(|s| format!("{s:?}"))
            .unwrap_or_default();

        self.lines.push(TraceLine {
            step,
            action,
            result,
            state,
            offset: [offset.x, offset.y],
            velocity: [velocity.x, velocity.y],
            timer_active: self.charm.is_timer_active(),
            delivered: surface.delivered(),
            clicks: surface.clicks().len(),
        });
    }
}

/// Render a trace as an aligned text table
pub fn format_trace(lines: &[TraceLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&format!(
            "{:>3}  {:<20} {:<9} {:<11} offset ({}, {})  velocity ({}, {}){}\n",
            line.step,
            line.action,
            line.result,
            line.state,
            line.offset[0],
            line.offset[1],
            line.velocity[0],
            line.velocity[1],
            if line.timer_active { "  [timer]" } else { "" },
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str, settle: bool) -> Vec<TraceLine> {
        let script = GestureScript::parse(script).unwrap();
        Session::new(&script, FlickConfig::default())
            .unwrap()
            .run(&script, settle)
    }

    #[test]
    fn test_tap_is_replayed() {
        let lines = run(
            r#"
            [surface]
            max_y = 1000

            [[steps]]
            kind = "press"
            x = 10
            y = 10

            [[steps]]
            kind = "release"
            x = 10
            y = 10
            "#,
            false,
        );

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].result, "pass");
        assert_eq!(lines[0].state, "Pressed");
        assert_eq!(lines[1].state, "Steady");
        // The replay is flushed after the last step but not recorded
        assert_eq!(lines[1].delivered, 2);
        assert_eq!(lines[1].clicks, 1);
    }

    #[test]
    fn test_flick_settles() {
        let lines = run(
            r#"
            [surface]
            max_y = 5000
            start_y = 1000
            axes = "vertical"

            [[steps]]
            kind = "press"
            x = 0
            y = 400

            [[steps]]
            kind = "move"
            x = 0
            y = 400

            [[steps]]
            kind = "move"
            x = 0
            y = 390

            [[steps]]
            kind = "tick"

            [[steps]]
            kind = "release"
            x = 0
            y = 390
            "#,
            true,
        );

        assert_eq!(lines[3].velocity, [0, -10]);
        assert_eq!(lines[3].offset, [0, 1010]);
        assert_eq!(lines[4].state, "AutoScroll");
        assert!(lines[4].timer_active);

        let settled = lines.last().unwrap();
        assert_eq!(settled.action, "settle x11");
        assert_eq!(settled.state, "Steady");
        assert!(!settled.timer_active);
        // 1010 plus 9 + 8 + ... + 1
        assert_eq!(settled.offset, [0, 1055]);
    }

    #[test]
    fn test_bundled_fling_script() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scripts/fling.toml");
        let script = GestureScript::load(&path).unwrap();
        let lines = Session::new(&script, FlickConfig::default())
            .unwrap()
            .run(&script, true);

        assert_eq!(lines[6].state, "AutoScroll");
        assert_eq!(lines[6].offset, [0, 1080]);
        // 39 + 38 + ... + 30
        assert_eq!(lines[7].offset, [0, 1425]);
        assert_eq!(lines[8].state, "Stop");
        assert_eq!(lines[8].velocity, [0, 0]);

        // Dragging a caught surface is swallowed
        assert_eq!(lines[9].result, "consumed");
        assert_eq!(lines[9].state, "ManualScroll");

        let last = lines.last().unwrap();
        assert_eq!(last.state, "Steady");
        assert_eq!(last.offset, [0, 1425]);
        assert!(!last.timer_active);
    }

    #[test]
    fn test_unscrollable_surface_is_an_error() {
        let script = GestureScript::parse(
            r#"
            [surface]
            max_x = 0
            max_y = 0
            "#,
        )
        .unwrap();

        let err = Session::new(&script, FlickConfig::default()).err().unwrap();
        assert!(err.to_string().contains("cannot scroll"));
    }

    #[test]
    fn test_format_trace() {
        let text = format_trace(&[TraceLine {
            step: 1,
            action: "tick x1".into(),
            result: "-",
            state: "AutoScroll".into(),
            offset: [0, 12],
            velocity: [0, -3],
            timer_active: true,
            delivered: 0,
            clicks: 0,
        }]);
        assert!(text.starts_with("  1  tick x1"));
        assert!(text.contains("offset (0, 12)"));
        assert!(text.trim_end().ends_with("[timer]"));
    }
}
