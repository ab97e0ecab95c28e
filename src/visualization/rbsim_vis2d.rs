use std::collections::HashMap;

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::math::primitives::{Circle, Rectangle};
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::simulation::scenario::Scenario;
use crate::simulation::snapshot::LatestSnapshot;
use crate::simulation::states::{BodyId, Shape};
use crate::simulation::vector::Vector2;
use crate::visualization::driver::{fixed_tick_system, tick_stats_system, TickDriver};

#[derive(Component)]
struct BodyTag(pub BodyId);

/// Target on-screen size of the world rectangle in pixels
const VIEW_SIZE: (f32, f32) = (1100.0, 620.0);
const MIN_ZOOM: f32 = 0.05;
const MAX_ZOOM: f32 = 20.0;

/// World units -> screen pixels, centered on the boundary
#[derive(Resource, Debug, Clone, Copy)]
struct ViewTransform {
    center: Vec2,
    scale: f32,
}

impl ViewTransform {
    fn to_screen(&self, p: &Vector2) -> Vec2 {
        (Vec2::new(p.x as f32, p.y as f32) - self.center) * self.scale
    }
}

pub fn run_2d(scenario: Scenario) {
    println!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.bodies().len());

    let boundary = scenario.boundary;
    let center = boundary.center();
    let view = ViewTransform {
        center: Vec2::new(center.x as f32, center.y as f32),
        scale: (VIEW_SIZE.0 / boundary.width() as f32).min(VIEW_SIZE.1 / boundary.height() as f32),
    };
    let driver = TickDriver::new(scenario.parameters.period());
    let latest = LatestSnapshot {
        snapshot: Some(scenario.snapshot()),
        published: 0,
    };

    App::new()
        .insert_resource(scenario)
        .insert_resource(driver)
        .insert_resource(latest)
        .insert_resource(view)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_bodies_system)
        .add_systems(
            Update,
            (
                fixed_tick_system,
                tick_stats_system,
                sync_transforms_system,
                draw_boundary_system,
                zoom_system,
            )
                .chain(),
        )
        .run();
}

fn setup_bodies_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    view: Res<ViewTransform>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    for body in scenario.bodies() {
        let mesh = match body.shape {
            Shape::Circle { radius } => meshes.add(Circle::new(radius as f32 * view.scale)),
            Shape::Box { width, height } => {
                meshes.add(Rectangle::new(width as f32 * view.scale, height as f32 * view.scale))
            }
        };
        let p = view.to_screen(&body.position);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(mesh),
                material: materials.add(ColorMaterial::from(Color::WHITE)),
                transform: Transform::from_xyz(p.x, p.y, 0.0),
                ..Default::default()
            },
            BodyTag(body.id),
        ));
    }
}

// Reads only the published snapshot, never the live bodies
fn sync_transforms_system(
    latest: Res<LatestSnapshot>,
    view: Res<ViewTransform>,
    mut query: Query<(&BodyTag, &mut Transform)>,
) {
    if !latest.is_changed() {
        return;
    }
    let Some(snapshot) = &latest.snapshot else {
        return;
    };

    let by_id: HashMap<BodyId, &Vector2> = snapshot.bodies.iter().map(|r| (r.id, &r.position)).collect();
    for (BodyTag(id), mut transform) in &mut query {
        if let Some(pos) = by_id.get(id) {
            let p = view.to_screen(pos);
            transform.translation.x = p.x;
            transform.translation.y = p.y;
        }
    }
}

fn draw_boundary_system(scenario: Res<Scenario>, view: Res<ViewTransform>, mut gizmos: Gizmos) {
    let b = scenario.boundary;
    let size = Vec2::new(b.width() as f32, b.height() as f32) * view.scale;
    gizmos.rect_2d(view.to_screen(&b.center()), 0.0, size, Color::srgb(0.4, 0.8, 0.4));
}

// Mouse wheel zoom, view state only
fn zoom_system(
    mut wheel: EventReader<MouseWheel>,
    mut cameras: Query<&mut OrthographicProjection, With<Camera2d>>,
) {
    let scroll: f32 = wheel
        .read()
        .map(|e| match e.unit {
            MouseScrollUnit::Line => e.y,
            MouseScrollUnit::Pixel => e.y / 100.0,
        })
        .sum();
    if scroll == 0.0 {
        return;
    }

    for mut projection in &mut cameras {
        projection.scale = (projection.scale * (1.0 - 0.1 * scroll)).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}
