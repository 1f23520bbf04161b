//! A jointed arm built from scaled cubes. Each part's frame is its parent's
//! frame times a local translate-then-rotate, so moving the shoulder carries
//! everything beyond it.

use crate::math::{Mat4, Vec3};
use crate::model::primitives;
use crate::render::{ColorProgram, ModelVobs, Shading, WebGLContext};
use super::{ControlValue, Scene, SceneView};

pub const BASE_HEIGHT: f32 = 0.2;
pub const UPPER_ARM_LENGTH: f32 = 1.0;
pub const FOREARM_LENGTH: f32 = 0.8;
pub const HAND_LENGTH: f32 = 0.3;

const JOINT_LIMIT: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmPart {
    Base,
    UpperArm,
    Forearm,
    Hand,
}

impl ArmPart {
    /// (width, length) of the cube drawn for the part
    fn dimensions(&self) -> (f32, f32) {
        match self {
            ArmPart::Base => (0.8, BASE_HEIGHT),
            ArmPart::UpperArm => (0.2, UPPER_ARM_LENGTH),
            ArmPart::Forearm => (0.15, FOREARM_LENGTH),
            ArmPart::Hand => (0.25, HAND_LENGTH),
        }
    }
}

/// Joint angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RobotArm {
    /// Base swivel about +y
    pub base: f32,
    /// Shoulder bend about +z
    pub upper_arm: f32,
    /// Elbow bend about +z
    pub forearm: f32,
    /// Wrist bend about +z
    pub hand: f32,
}

impl RobotArm {
    pub fn apply_control(&mut self, name: &str, value: ControlValue) -> bool {
        let degrees = value.as_f32();
        match name {
            "base" => self.base = degrees.rem_euclid(360.0),
            "upper_arm" => self.upper_arm = degrees.clamp(-JOINT_LIMIT, JOINT_LIMIT),
            "forearm" => self.forearm = degrees.clamp(-JOINT_LIMIT, JOINT_LIMIT),
            "hand" => self.hand = degrees.clamp(-JOINT_LIMIT, JOINT_LIMIT),
            _ => return false,
        }
        true
    }

    /// Joint frames: each part's origin sits at its joint, +y along the part
    pub fn frames(&self) -> [(ArmPart, Mat4); 4] {
        let base = Mat4::rotation_y(self.base.to_radians());
        let upper = Mat4::multiply_series(&[
            base,
            Mat4::translation(0.0, BASE_HEIGHT, 0.0),
            Mat4::rotation_z(self.upper_arm.to_radians()),
        ]);
        let fore = Mat4::multiply_series(&[
            upper,
            Mat4::translation(0.0, UPPER_ARM_LENGTH, 0.0),
            Mat4::rotation_z(self.forearm.to_radians()),
        ]);
        let hand = Mat4::multiply_series(&[
            fore,
            Mat4::translation(0.0, FOREARM_LENGTH, 0.0),
            Mat4::rotation_z(self.hand.to_radians()),
        ]);

        [
            (ArmPart::Base, base),
            (ArmPart::UpperArm, upper),
            (ArmPart::Forearm, fore),
            (ArmPart::Hand, hand),
        ]
    }

    /// Model matrices that stretch a unit cube over each part
    pub fn part_transforms(&self) -> [(ArmPart, Mat4); 4] {
        self.frames().map(|(part, frame)| {
            let (width, length) = part.dimensions();
            let local = Mat4::translation(0.0, length / 2.0, 0.0).mul(&Mat4::scale(width, length, width));
            (part, frame.mul(&local))
        })
    }

    /// World position of the end of the hand
    pub fn tip(&self) -> Vec3 {
        let (_, hand) = self.frames()[3];
        hand.transform_point(Vec3::new(0.0, HAND_LENGTH, 0.0))
    }
}

pub struct RobotArmScene {
    pub arm: RobotArm,
    program: ColorProgram,
    cube: ModelVobs,
    axes: ModelVobs,
}

impl RobotArmScene {
    pub fn new(ctx: &WebGLContext) -> Result<Self, String> {
        Ok(Self {
            arm: RobotArm::default(),
            program: ColorProgram::new(ctx)?,
            cube: ModelVobs::new(ctx, &primitives::cube(1.0), Shading::Flat)?,
            axes: ModelVobs::new(ctx, &primitives::axes(2.0), Shading::Flat)?,
        })
    }
}

impl Scene for RobotArmScene {
    fn render(&mut self, ctx: &WebGLContext, view: &SceneView) {
        self.program.bind(ctx, &view.transform(&Mat4::identity()), 1.0);
        self.axes.draw(ctx);

        for (_, model) in self.arm.part_transforms() {
            self.program.bind(ctx, &view.transform(&model), 1.0);
            self.cube.draw(ctx);
        }
    }

    fn set_control(&mut self, _ctx: &WebGLContext, name: &str, value: ControlValue) -> Result<bool, String> {
        Ok(self.arm.apply_control(name, value))
    }

    fn on_frame(&mut self, progress: f32) {
        // Wave the arm back and forth
        let phase = (progress * std::f32::consts::TAU).sin();
        self.arm.upper_arm = 30.0 * phase;
        self.arm.forearm = 45.0 * phase;
        self.arm.hand = -30.0 * phase;
    }

    fn delete(&mut self, ctx: &WebGLContext) {
        self.cube.delete(ctx);
        self.axes.delete(ctx);
        self.program.delete(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REACH: f32 = UPPER_ARM_LENGTH + FOREARM_LENGTH + HAND_LENGTH;

    #[test]
    fn test_straight_arm_points_up() {
        let tip = RobotArm::default().tip();
        assert!(tip.distance(&Vec3::new(0.0, BASE_HEIGHT + REACH, 0.0)) < 1e-5);
    }

    #[test]
    fn test_shoulder_carries_children() {
        let arm = RobotArm { upper_arm: 90.0, ..Default::default() };
        // Rotating +y by 90 degrees about +z lands on -x
        let tip = arm.tip();
        assert!(tip.distance(&Vec3::new(-REACH, BASE_HEIGHT, 0.0)) < 1e-5);
    }

    #[test]
    fn test_base_swivel_applies_last() {
        let arm = RobotArm { base: 90.0, upper_arm: 90.0, ..Default::default() };
        let tip = arm.tip();
        assert!(tip.distance(&Vec3::new(0.0, BASE_HEIGHT, REACH)) < 1e-5);
    }

    #[test]
    fn test_elbow_only_moves_forearm_and_hand() {
        let straight = RobotArm::default().frames();
        let bent = RobotArm { forearm: 45.0, ..Default::default() }.frames();
        assert_eq!(straight[0], bent[0]);
        assert_eq!(straight[1], bent[1]);
        assert_ne!(straight[2], bent[2]);
    }

    #[test]
    fn test_part_transform_spans_part() {
        let arm = RobotArm::default();
        let (part, upper) = arm.part_transforms()[1];
        assert_eq!(part, ArmPart::UpperArm);
        // Bottom and top faces of the unit cube land on the joints
        let bottom = upper.transform_point(Vec3::new(0.0, -0.5, 0.0));
        let top = upper.transform_point(Vec3::new(0.0, 0.5, 0.0));
        assert!(bottom.distance(&Vec3::new(0.0, BASE_HEIGHT, 0.0)) < 1e-5);
        assert!(top.distance(&Vec3::new(0.0, BASE_HEIGHT + UPPER_ARM_LENGTH, 0.0)) < 1e-5);
    }

    #[test]
    fn test_controls_clamp() {
        let mut arm = RobotArm::default();
        assert!(arm.apply_control("forearm", ControlValue::Number(500.0)));
        assert_eq!(arm.forearm, JOINT_LIMIT);
        assert!(arm.apply_control("base", ControlValue::Number(450.0)));
        assert_eq!(arm.base, 90.0);
        assert!(!arm.apply_control("gripper", ControlValue::Number(1.0)));
    }
}
