use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use vivarium_core::OrganismSnapshot;

/// Multi-line diagnostic dump: position, size, food, facing, the leading
/// memory bytes and every lane's pointers and registers.
pub fn dump_organism(snapshot: &OrganismSnapshot) -> String {
    let fp = &snapshot.footprint;
    let bytes: Vec<String> = snapshot.memory_head.iter().map(u8::to_string).collect();
    let mut lines = vec![
        format!("Organism {}:", snapshot.id),
        format!("x: {}, y: {}", fp.x, fp.y),
        format!("width: {}, height: {}", fp.width, fp.height),
        format!("food: {}, facing: {:?}", snapshot.food, snapshot.facing),
        format!("age: {}, generation: {}", snapshot.age, snapshot.generation),
        format!("First {} bytes:", snapshot.memory_head.len()),
        bytes.join(" "),
    ];
    for (i, lane) in snapshot.lanes.iter().enumerate() {
        lines.push(format!("Lane #{i}:"));
        lines.push(format!("  IP: {}", lane.ip));
        lines.push(format!("  *IP: {}", describe(lane.at_ip)));
        lines.push(format!("  P: {}", lane.dp));
        lines.push(format!("  *P: {}", describe(lane.at_dp)));
        lines.push(format!("  Loop depth: {}", lane.loop_depth));
        lines.extend(
            lane.registers
                .iter()
                .enumerate()
                .map(|(r, value)| format!("  Register {r}: {value}")),
        );
    }
    lines.push(format!("Shared register: {}", snapshot.shared_register));
    lines.join("\n")
}

fn describe(byte: Option<u8>) -> String {
    byte.map_or_else(|| "-".to_string(), |b| b.to_string())
}

/// Side panel showing [`dump_organism`] for the focused organism.
pub struct DumpPanel<'a> {
    snapshot: Option<&'a OrganismSnapshot>,
}

impl<'a> DumpPanel<'a> {
    pub fn new(snapshot: Option<&'a OrganismSnapshot>) -> Self {
        Self { snapshot }
    }
}

impl Widget for DumpPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self
            .snapshot
            .map_or_else(|| "No organisms alive".to_string(), dump_organism);
        Paragraph::new(text)
            .block(Block::default().title("Organism").borders(Borders::ALL))
            .render(area, buf);
    }
}
