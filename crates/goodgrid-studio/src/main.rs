//! Renders one overlay frame for a synthetic editor state into an offscreen
//! target and writes it as a binary PPM.
//!
//! Usage: `goodgrid-studio [OUTPUT.ppm]`

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use goodgrid_engine::coords::{Vec2, Viewport};
use goodgrid_engine::device::{Gpu, GpuInit};
use goodgrid_engine::host::{
    AudioGuide, AudioPlayback, Camera, ConstantSpeedTimeline, DurationTrigger, EffectTrigger,
    ObjectKind, ObjectState, Speed, TriggerDuration,
};
use goodgrid_engine::logging::{init_logging, LoggingConfig};
use goodgrid_engine::nodes::{BpmTriggers, EffectLines, Grid};
use goodgrid_engine::paint::{LineColor, Rgba8};
use goodgrid_engine::render::{OverlayRenderer, RenderTarget};
use goodgrid_engine::{DrawGrid, EditorSnapshot, FrameOutcome, LineOverride};

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("goodgrid-frame.ppm"));

    let editor = demo_editor();
    let timeline = ConstantSpeedTimeline::new(editor.speeds.normal);

    let mut grid = DrawGrid::new();
    customize(&mut grid)?;
    grid.generate_time_markers("300,1,600,0.9,900,0.8,1200,0.5");
    grid.init(&editor);

    let gpu = pollster::block_on(Gpu::new(GpuInit {
        width: WIDTH,
        height: HEIGHT,
        ..GpuInit::default()
    }))
    .context("failed to create headless GPU context")?;

    let mut renderer = OverlayRenderer::new();
    renderer.begin_frame(&editor.camera);

    match grid.draw(&editor, &timeline, &mut renderer) {
        FrameOutcome::Drawn(stats) => log::info!(
            "frame: {} draw calls, {} line batches, {} vertices",
            stats.draw_calls,
            stats.line_batches,
            stats.vertices
        ),
        other => log::warn!("frame not drawn: {other:?}"),
    }

    let mut frame = gpu.begin_frame(wgpu::Color {
        r: 0.25,
        g: 0.4,
        b: 0.75,
        a: 1.0,
    });
    {
        let ctx = gpu.render_ctx();
        let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
        renderer.render(&ctx, &mut target);
    }
    gpu.submit(frame);

    let pixels = gpu.read_target()?;
    write_ppm(&output, &pixels)?;
    log::info!(
        "wrote {} ({} batches, {} staged vertices)",
        output.display(),
        renderer.batches().len(),
        renderer.staged_vertices().len()
    );
    Ok(())
}

/// Priority-ranked tweaks an extension would make.
fn customize(grid: &mut DrawGrid) -> Result<()> {
    grid.node_with_id_mut::<Grid>("grid")?
        .lines_mut()
        .set_color(LineColor::rgba(0, 0, 0, 90), 1);

    grid.node_mut::<EffectLines>()?.set_properties_for_object(
        |cx| {
            if cx.trigger.object.kind == ObjectKind::Other && cx.x > 600.0 {
                LineOverride::keep().color(Rgba8::new(255, 80, 200, 255)).width(2.0)
            } else {
                LineOverride::keep()
            }
        },
        0,
    );

    grid.node_mut::<BpmTriggers>()?.set_properties_for_beats(
        |cx| {
            if cx.beat % cx.beats_per_bar == 0 {
                LineOverride::keep().width(2.0)
            } else {
                LineOverride::keep()
            }
        },
        0,
    );

    grid.set_z_order("audio-line", 10)?;
    Ok(())
}

fn demo_editor() -> EditorSnapshot {
    let zoom = 1.5;
    let center = Vec2::new(600.0, 300.0);
    let half_window = Vec2::new(WIDTH as f32, HEIGHT as f32) * 0.5;

    let effect = |uid, x| EffectTrigger {
        object: ObjectState::new(uid, Vec2::new(x, 165.0)),
        ..Default::default()
    };

    EditorSnapshot {
        window: Viewport::new(WIDTH as f32, HEIGHT as f32),
        camera: Camera {
            // `center` lands in the middle of the window
            layer_position: half_window - center * zoom,
            zoom,
            angle_degrees: 0.0,
        },
        show_ground: false,
        toolbar_height: 90.0,
        preview_position: Vec2::new(780.0, 0.0),
        audio: AudioPlayback { active: true, time: 2.5 },
        guide_objects: vec![
            ObjectState::new(1, Vec2::new(450.0, 255.0)).with_kind(ObjectKind::ShipPortal),
            ObjectState::new(2, Vec2::new(900.0, 405.0)).with_kind(ObjectKind::BallPortal),
        ],
        effect_triggers: vec![effect(10, 345.0), effect(11, 645.0), effect(12, 915.0)],
        duration_triggers: vec![DurationTrigger {
            object: ObjectState::new(20, Vec2::new(225.0, 315.0)),
            duration: TriggerDuration::Pulse {
                fade_in: 0.25,
                hold: 0.5,
                fade_out: 0.5,
            },
            ..Default::default()
        }],
        audio_guides: vec![AudioGuide {
            object: ObjectState::new(30, Vec2::new(0.0, 105.0)),
            disabled: false,
            speed: Speed::Normal,
            duration: 8.0,
            bpm: 120.0,
            beats_per_bar: 4,
        }],
        ..EditorSnapshot::default()
    }
}

fn write_ppm(path: &Path, rgba: &[u8]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = std::io::BufWriter::new(file);

    write!(out, "P6\n{WIDTH} {HEIGHT}\n255\n")?;
    for px in rgba.chunks_exact(4) {
        out.write_all(&px[..3])?;
    }
    out.flush()?;
    Ok(())
}
