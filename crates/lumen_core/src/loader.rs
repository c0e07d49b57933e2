//! JSON scene description files.
//!
//! A scene file names its materials once and refers to them from the
//! sphere list. The four showcase materials (`ivory`, `glass`,
//! `red_rubber`, `mirror`) are always available unless the file
//! redefines them.
//!
//! ```json
//! {
//!   "camera": { "width": 640, "height": 480, "fov_degrees": 60 },
//!   "materials": { "chalk": { "diffuse_color": [0.9, 0.9, 0.9] } },
//!   "spheres": [
//!     { "center": [0, 0, -5], "radius": 2, "material": "chalk" },
//!     { "center": [3, 0, -8], "radius": 1, "material": "glass" }
//!   ],
//!   "lights": [ { "position": [0, 5, -5], "intensity": 1.0 } ],
//!   "ground": {},
//!   "environment": { "path": "envmap.jpg" }
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lumen_math::Vec3;
use serde::Deserialize;

use crate::environment::{EnvMap, Environment};
use crate::error::{SceneError, SceneResult};
use crate::ground::GroundPlane;
use crate::material::{Color, Material};
use crate::scene::{Light, Scene, DEFAULT_MAX_DISTANCE};
use crate::sphere::Sphere;

/// Image settings carried by a scene file.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    /// Full field of view in degrees
    pub fov_degrees: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            fov_degrees: 60.0,
        }
    }
}

/// A fully resolved scene file.
#[derive(Clone, Debug)]
pub struct SceneDescription {
    pub scene: Scene,
    pub camera: CameraSettings,
    pub environment: Environment,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    #[serde(default)]
    camera: CameraSettings,
    #[serde(default)]
    materials: HashMap<String, Material>,
    #[serde(default)]
    spheres: Vec<SphereEntry>,
    #[serde(default)]
    lights: Vec<Light>,
    #[serde(default)]
    ground: Option<GroundPlane>,
    #[serde(default)]
    environment: Option<EnvironmentEntry>,
    #[serde(default = "default_max_distance")]
    max_distance: f32,
}

fn default_max_distance() -> f32 {
    DEFAULT_MAX_DISTANCE
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SphereEntry {
    center: Vec3,
    radius: f32,
    material: MaterialRef,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaterialRef {
    Named(String),
    Inline(Material),
}

/// Exactly one of `color` or `path` must be given.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EnvironmentEntry {
    color: Option<Color>,
    path: Option<PathBuf>,
}

/// Load a scene description from a JSON file.
///
/// Relative environment map paths resolve against the file's directory.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let description = parse_with_base(&json, base_dir)?;

    log::info!(
        "Loaded scene {}: {} spheres, {} lights",
        path.display(),
        description.scene.spheres.len(),
        description.scene.lights.len()
    );
    Ok(description)
}

/// Parse a scene description from a JSON string.
///
/// Relative environment map paths resolve against the working directory.
pub fn parse_scene(json: &str) -> SceneResult<SceneDescription> {
    parse_with_base(json, Path::new(""))
}

fn parse_with_base(json: &str, base_dir: &Path) -> SceneResult<SceneDescription> {
    let file: SceneFile = serde_json::from_str(json)?;

    let mut materials = builtin_materials();
    materials.extend(file.materials);

    let mut scene = Scene::new();
    scene.max_distance = file.max_distance;
    scene.ground = file.ground;
    scene.lights = file.lights;

    for (index, entry) in file.spheres.into_iter().enumerate() {
        let material = match entry.material {
            MaterialRef::Inline(material) => material,
            MaterialRef::Named(name) => match materials.get(&name) {
                Some(material) => *material,
                None => return Err(SceneError::UnknownMaterial { index, name }),
            },
        };
        scene.spheres.push(Sphere::new(entry.center, entry.radius, material));
    }

    scene.validate()?;

    let environment = match file.environment {
        None => Environment::default(),
        Some(EnvironmentEntry { color: Some(color), path: None }) => Environment::Solid(color),
        Some(EnvironmentEntry { color: None, path: Some(path) }) => {
            let resolved = if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            };
            Environment::Map(EnvMap::load(resolved)?)
        }
        Some(_) => {
            return Err(SceneError::Invalid(
                "environment needs exactly one of \"color\" or \"path\"".to_string(),
            ))
        }
    };

    if file.camera.width == 0 || file.camera.height == 0 {
        return Err(SceneError::Invalid(format!(
            "camera resolution must be non-zero, got {}x{}",
            file.camera.width, file.camera.height
        )));
    }

    Ok(SceneDescription {
        scene,
        camera: file.camera,
        environment,
    })
}

fn builtin_materials() -> HashMap<String, Material> {
    HashMap::from([
        ("ivory".to_string(), Material::ivory()),
        ("glass".to_string(), Material::glass()),
        ("red_rubber".to_string(), Material::red_rubber()),
        ("mirror".to_string(), Material::mirror()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Vec4;

    const SIMPLE: &str = r#"{
        "camera": { "width": 64, "height": 48, "fov_degrees": 45 },
        "materials": { "chalk": { "diffuse_color": [0.9, 0.9, 0.9] } },
        "spheres": [
            { "center": [0, 0, -5], "radius": 2, "material": "chalk" },
            { "center": [3, 0, -8], "radius": 1, "material": "glass" },
            { "center": [-3, 0, -8], "radius": 1,
              "material": { "albedo": [0, 1, 0, 0], "specular_exponent": 20 } }
        ],
        "lights": [ { "position": [0, 5, -5], "intensity": 1.0 } ],
        "environment": { "color": [0.1, 0.2, 0.3] }
    }"#;

    #[test]
    fn test_parse_simple_scene() {
        let desc = parse_scene(SIMPLE).unwrap();
        assert_eq!(desc.camera.width, 64);
        assert_eq!(desc.camera.fov_degrees, 45.0);
        assert_eq!(desc.scene.spheres.len(), 3);
        assert_eq!(desc.scene.lights.len(), 1);
        assert!(desc.scene.ground.is_none());
        assert_eq!(desc.scene.max_distance, DEFAULT_MAX_DISTANCE);

        assert_eq!(desc.scene.spheres[0].material().diffuse_color, Vec3::splat(0.9));
        assert_eq!(*desc.scene.spheres[1].material(), Material::glass());
        assert_eq!(desc.scene.spheres[2].material().albedo, Vec4::new(0.0, 1.0, 0.0, 0.0));

        match desc.environment {
            Environment::Solid(c) => assert_eq!(c, Vec3::new(0.1, 0.2, 0.3)),
            Environment::Map(_) => panic!("expected a solid environment"),
        }
    }

    #[test]
    fn test_ground_defaults() {
        let desc = parse_scene(r#"{ "ground": { "height": -2 } }"#).unwrap();
        let ground = desc.scene.ground.unwrap();
        assert_eq!(ground.height, -2.0);
        assert_eq!(ground.half_width, GroundPlane::default().half_width);
        assert_eq!(desc.camera, CameraSettings::default());
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"{ "spheres": [ { "center": [0, 0, -5], "radius": 1, "material": "jade" } ] }"#;
        match parse_scene(json) {
            Err(SceneError::UnknownMaterial { index, name }) => {
                assert_eq!(index, 0);
                assert_eq!(name, "jade");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_invalid_radius() {
        let json = r#"{ "spheres": [ { "center": [0, 0, -5], "radius": -1, "material": "ivory" } ] }"#;
        assert!(matches!(parse_scene(json), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn test_zero_resolution() {
        let json = r#"{ "camera": { "width": 0 } }"#;
        assert!(matches!(parse_scene(json), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_scene("{ spheres: "), Err(SceneError::Parse(_))));
        assert!(matches!(parse_scene(r#"{ "sphere": [] }"#), Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_misspelled_nested_fields_rejected() {
        let typos = [
            r#"{ "ground": { "heigth": -2 } }"#,
            r#"{ "camera": { "fov": 45 } }"#,
            r#"{ "lights": [ { "position": [0, 5, 0], "intensity": 1.0, "colour": [1, 1, 1] } ] }"#,
            r#"{ "materials": { "chalk": { "albdo": [0, 0, 1, 0] } } }"#,
            r#"{ "spheres": [ { "center": [0, 0, -5], "radius": 1, "material": { "albdo": [0, 0, 1, 0] } } ] }"#,
            r#"{ "spheres": [ { "centre": [0, 0, -5], "radius": 1, "material": "ivory" } ] }"#,
            r#"{ "environment": { "colour": [0.1, 0.2, 0.3] } }"#,
        ];
        for json in typos {
            assert!(matches!(parse_scene(json), Err(SceneError::Parse(_))), "accepted {}", json);
        }
    }

    #[test]
    fn test_environment_needs_one_source() {
        for json in [
            r#"{ "environment": {} }"#,
            r#"{ "environment": { "color": [0, 0, 0], "path": "sky.png" } }"#,
        ] {
            assert!(matches!(parse_scene(json), Err(SceneError::Invalid(_))), "accepted {}", json);
        }
    }

    #[test]
    fn test_missing_environment_map() {
        let json = r#"{ "environment": { "path": "no_such_envmap.png" } }"#;
        assert!(matches!(parse_scene(json), Err(SceneError::Environment(_))));
    }

    #[test]
    fn test_load_scene_file() {
        let dir = std::env::temp_dir().join("lumen_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("simple.json");
        std::fs::write(&path, SIMPLE).unwrap();

        let desc = load_scene(&path).unwrap();
        assert_eq!(desc.scene.spheres.len(), 3);

        let missing = load_scene(dir.join("missing.json"));
        assert!(matches!(missing, Err(SceneError::Io { .. })));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_shipped_scenes_parse() {
        let showcase = parse_scene(include_str!("../../../scenes/showcase.json")).unwrap();
        let demo = Scene::demo();
        assert_eq!(showcase.scene.spheres, demo.spheres);
        assert_eq!(showcase.scene.lights, demo.lights);
        assert_eq!(showcase.scene.ground, demo.ground);

        let single = parse_scene(include_str!("../../../scenes/single_sphere.json")).unwrap();
        assert_eq!(single.scene.spheres.len(), 1);
        assert_eq!(single.camera.width, 640);
    }
}
