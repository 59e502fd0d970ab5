use crate::coords::{Vec2, Viewport};

use super::objects::{AudioGuide, DurationTrigger, EffectTrigger, ObjectState, Speed};

/// Editor playback state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum PlaybackMode {
    /// Editing.
    #[default]
    Not,
    /// Playtesting.
    Playing,
    /// Playtest paused.
    Paused,
}

/// The editor camera, expressed through the object layer it moves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// Object layer position in screen points.
    pub layer_position: Vec2,
    /// Object layer scale. Zero means the editor is not presenting a level.
    pub zoom: f32,
    /// Camera rotation in degrees.
    pub angle_degrees: f32,
}

impl Camera {
    /// World-space point under the object layer origin's opposite, i.e. the view
    /// center the engine culls around.
    #[inline]
    pub fn center(&self) -> Vec2 {
        -self.layer_position / self.zoom
    }

    /// Maps a screen point into object (world) space, ignoring rotation.
    #[inline]
    pub fn to_layer_space(&self, screen: Vec2) -> Vec2 {
        (screen - self.layer_position) / self.zoom
    }

    #[inline]
    pub fn angle_radians(&self) -> f32 {
        self.angle_degrees.to_radians()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            layer_position: Vec2::zero(),
            zoom: 1.0,
            angle_degrees: 0.0,
        }
    }
}

/// Units per second for each speed class.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpeedTable {
    pub slow: f32,
    pub normal: f32,
    pub fast: f32,
    pub faster: f32,
    pub fastest: f32,
}

impl SpeedTable {
    #[inline]
    pub fn speed(&self, speed: Speed) -> f32 {
        match speed {
            Speed::Slow => self.slow,
            Speed::Normal => self.normal,
            Speed::Fast => self.fast,
            Speed::Faster => self.faster,
            Speed::Fastest => self.fastest,
        }
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            slow: 251.16,
            normal: 311.58,
            fast: 387.42,
            faster: 468.0,
            fastest: 576.0,
        }
    }
}

/// Music playback state of the editor.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct AudioPlayback {
    /// Music preview is running.
    pub active: bool,
    /// Seconds since the start of the level.
    pub time: f32,
}

/// Everything the engine reads from the host for one frame.
///
/// Built by the integration each frame (or patched in place). The engine only reads
/// it; nothing here is written back.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSnapshot {
    pub window: Viewport,
    pub camera: Camera,
    pub playback_mode: PlaybackMode,

    pub show_grid: bool,
    pub hide_grid_on_play: bool,
    pub show_ground: bool,
    pub draw_effect_lines: bool,
    pub show_duration_lines: bool,
    pub show_song_markers: bool,
    /// The host's "hide invisible" editor variable, re-read every frame.
    pub hide_invisible: bool,
    /// Set by the host after objects moved or snapped; drops cached duration ends.
    pub update_time_markers: bool,

    /// Grid cell size in world units.
    pub grid_size: f32,
    /// Level height follows the grid bounds instead of the fixed maximum.
    pub dynamic_level_height: bool,

    pub player_flying: bool,
    pub min_portal_y: f32,
    pub max_portal_y: f32,

    /// Preview-lock position; `x <= 0` means unset.
    pub preview_position: Vec2,
    /// Height of the editor toolbar in screen points.
    pub toolbar_height: f32,
    pub rotate_channel: i32,

    pub speeds: SpeedTable,
    pub audio: AudioPlayback,

    pub guide_objects: Vec<ObjectState>,
    pub effect_triggers: Vec<EffectTrigger>,
    pub duration_triggers: Vec<DurationTrigger>,
    pub audio_guides: Vec<AudioGuide>,
}

impl EditorSnapshot {
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playback_mode == PlaybackMode::Playing
    }
}

impl Default for EditorSnapshot {
    fn default() -> Self {
        Self {
            window: Viewport::new(569.0, 320.0),
            camera: Camera::default(),
            playback_mode: PlaybackMode::Not,
            show_grid: true,
            hide_grid_on_play: false,
            show_ground: true,
            draw_effect_lines: true,
            show_duration_lines: true,
            show_song_markers: true,
            hide_invisible: false,
            update_time_markers: false,
            grid_size: 30.0,
            dynamic_level_height: false,
            player_flying: false,
            min_portal_y: 0.0,
            max_portal_y: 0.0,
            preview_position: Vec2::zero(),
            toolbar_height: 0.0,
            rotate_channel: 0,
            speeds: SpeedTable::default(),
            audio: AudioPlayback::default(),
            guide_objects: Vec::new(),
            effect_triggers: Vec::new(),
            duration_triggers: Vec::new(),
            audio_guides: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_center_is_negated_layer_position() {
        let cam = Camera { layer_position: Vec2::new(-200.0, 100.0), zoom: 2.0, angle_degrees: 0.0 };
        assert_eq!(cam.center(), Vec2::new(100.0, -50.0));
        assert_eq!(cam.to_layer_space(Vec2::new(0.0, 100.0)), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn speed_table_lookup() {
        let t = SpeedTable::default();
        assert_eq!(t.speed(Speed::Normal), 311.58);
        assert_eq!(t.speed(Speed::Fastest), 576.0);
    }
}
