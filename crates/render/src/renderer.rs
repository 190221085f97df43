use worldbox_kernel::DrawList;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer consumes one pass of one frame and produces output. It never
/// sees the world itself; world truth is kernel-owned.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one draw list.
    fn render(&self, frame: &DrawList) -> Self::Output;
}

/// Human-readable frame dump.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &DrawList) -> String {
        let mut out = String::new();
        let c = frame.camera_position;
        out.push_str(&format!(
            "=== Frame (tick={}, pass={} #{}) ===\n",
            frame.tick,
            frame.pass,
            frame.pass.index()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1})\n",
            c.x, c.y, c.z
        ));
        out.push_str(&format!("Draw calls: {}\n", frame.len()));

        for call in &frame.calls {
            let p = call.model.w_axis;
            let marker = if call.selected { '*' } else { ' ' };
            out.push_str(&format!(
                " {marker}[{}] {:<12} pos=({:.2}, {:.2}, {:.2})",
                call.id.short(),
                call.name,
                p.x,
                p.y,
                p.z
            ));
            if call.pick_id != 0 {
                out.push_str(&format!(" pick={}", call.pick_id));
            }
            out.push('\n');
        }

        out
    }
}

/// Serializes the draw list as JSON.
#[derive(Debug, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl JsonRenderer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Renderer for JsonRenderer {
    type Output = Result<String, serde_json::Error>;

    fn render(&self, frame: &DrawList) -> Self::Output {
        tracing::trace!(calls = frame.len(), pretty = self.pretty, "rendering frame as json");
        if self.pretty {
            serde_json::to_string_pretty(frame)
        } else {
            serde_json::to_string(frame)
        }
    }
}
