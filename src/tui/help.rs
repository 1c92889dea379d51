/// Help panel overlay with scrollable documentation sections.

pub struct HelpPanel {
    pub visible: bool,
    pub scroll: usize,
}

impl HelpPanel {
    pub fn new() -> Self {
        Self {
            visible: false,
            scroll: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.scroll = 0;
        }
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll = (self.scroll + n).min(self.total_lines());
    }

    pub fn total_lines(&self) -> usize {
        HELP_SECTIONS.iter().map(|(_, content)| {
            // title line + blank + content lines + blank
            2 + content.lines().count() + 1
        }).sum()
    }
}

impl Default for HelpPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Help content: (section_title, content_text)
pub static HELP_SECTIONS: &[(&str, &str)] = &[
    ("Quick Start", "\
A circle of radius r rolls along the baseline without slipping.
The red dot on its rim traces a cycloid:

  x = r (t - sin t)      y = r (1 - cos t)      t in [0, 4pi]

Press Space to play. The animation runs 100 frames, two full turns."),

    ("Playback", "\
  Space / p       play or pause
  m               switch toggle policy (restart / resume)

With the restart policy every toggle rewinds to the first frame,
pausing included. With resume, pausing keeps the current frame."),

    ("Controls", "\
  Left / Right    radius -/+ 0.1      (0.1 to 2.0)
  - / +           radius -/+ 0.1
  Down / Up       speed -/+ 1 fps     (30 to 100)
  PgDn / PgUp     speed -/+ 10 fps
  c / C           next / previous preset color
  #               type a hex color, Enter to apply, Esc to cancel"),

    ("Other Keys", "\
  F1 / ?          toggle this help
  q / Esc         quit
  Ctrl-D          quit"),

    ("Why Cycloids Matter", "\
Tautochrone: a bead sliding without friction on an inverted cycloid
reaches the bottom in the same time from any starting point. Huygens
used this to build pendulum clocks with a period independent of swing.

Brachistochrone: between two points, the cycloid is the curve of
fastest descent under gravity, the problem Johann Bernoulli posed
and Newton, Leibniz and others solved.

Engineering: cycloidal profiles appear in gear teeth, cam mechanisms
and arches."),
];
