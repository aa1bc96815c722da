//! ASCII rendering of a grid

use crate::gridworld::{GridView, GridWorld, Position};

/// Draw the grid row by row: `A` agent, `G` goal, `#` obstacle, `.` empty.
///
/// The agent marker wins over the goal once the goal is reached.
pub fn render(view: &GridView<'_>) -> String {
    let mut out = String::with_capacity(view.rows * (view.cols * 2 + 1));
    for row in 0..view.rows {
        let line: Vec<&str> = (0..view.cols)
            .map(|col| {
                let cell = Position::new(row, col);
                if cell == view.agent {
                    "A"
                } else if cell == view.goal {
                    "G"
                } else if view.obstacles.contains(&cell) {
                    "#"
                } else {
                    "."
                }
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

pub fn render_env(env: &GridWorld) -> String {
    render(&env.view())
}
