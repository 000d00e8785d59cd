use glam::Quat;
use rapier3d::prelude::ImpulseJointHandle;

use super::Handedness;

/// The five digits of a hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    /// Thumb
    Thumb,
    /// Index finger
    Index,
    /// Middle finger
    Middle,
    /// Ring finger
    Ring,
    /// Little finger
    Pinky,
}

impl Finger {
    /// Every finger, thumb first
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    fn bone_prefix(&self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }
}

/// The three segments of a finger, from the palm outwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerPart {
    /// Closest to the palm
    Proximal,
    /// Middle segment
    Intermediate,
    /// The fingertip
    Distal,
}

impl FingerPart {
    /// Every segment, palm first
    pub const ALL: [FingerPart; 3] = [
        FingerPart::Proximal,
        FingerPart::Intermediate,
        FingerPart::Distal,
    ];

    fn bone_index(&self) -> usize {
        match self {
            FingerPart::Proximal => 1,
            FingerPart::Intermediate => 2,
            FingerPart::Distal => 3,
        }
    }
}

/// One finger segment and the joint drive that moves it
#[derive(Debug, Clone, PartialEq)]
pub struct FingerSegment {
    /// Which finger this segment belongs to
    pub finger: Finger,
    /// Which part of the finger this is
    pub part: FingerPart,
    /// Name of the skeletal bone, eg. `index_02_l`
    pub bone_name: String,
    /// The physics joint driving this segment, once the skeleton has been bound
    pub drive: Option<ImpulseJointHandle>,
    /// Orientation the drive is pulling the segment towards
    pub target: Quat,
    /// Orientation the segment had when the physics simulation was last read
    pub current: Quat,
}

/// The fifteen driven finger segments of a hand.
///
/// Bone names are fixed by handedness when the rig is created. The only thing that changes
/// afterwards is which joint drives back each segment, once the skeleton is ready.
#[derive(Debug, Clone, PartialEq)]
pub struct FingerRig {
    handedness: Handedness,
    segments: Vec<FingerSegment>,
}

impl FingerRig {
    /// Create an unbound rig for a hand
    pub fn new(handedness: Handedness) -> Self {
        let suffix = handedness.bone_suffix();
        let segments = Finger::ALL
            .iter()
            .flat_map(|finger| {
                FingerPart::ALL.iter().map(move |part| FingerSegment {
                    finger: *finger,
                    part: *part,
                    bone_name: format!(
                        "{}_{:02}_{}",
                        finger.bone_prefix(),
                        part.bone_index(),
                        suffix
                    ),
                    drive: None,
                    target: Quat::IDENTITY,
                    current: Quat::IDENTITY,
                })
            })
            .collect();

        Self {
            handedness,
            segments,
        }
    }

    /// Which hand is this rig for?
    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// A single segment
    pub fn segment(&self, finger: Finger, part: FingerPart) -> &FingerSegment {
        &self.segments[Self::index(finger, part)]
    }

    /// A single segment, mutably
    pub fn segment_mut(&mut self, finger: Finger, part: FingerPart) -> &mut FingerSegment {
        &mut self.segments[Self::index(finger, part)]
    }

    /// All segments, finger by finger
    pub fn segments(&self) -> impl Iterator<Item = &FingerSegment> {
        self.segments.iter()
    }

    /// All segments, finger by finger, mutably
    pub fn segments_mut(&mut self) -> impl Iterator<Item = &mut FingerSegment> {
        self.segments.iter_mut()
    }

    /// Look up the joint drive for each segment by bone name. Returns how many segments were bound.
    pub fn bind_drives(
        &mut self,
        mut lookup: impl FnMut(&str) -> Option<ImpulseJointHandle>,
    ) -> usize {
        let mut bound = 0;
        for segment in &mut self.segments {
            segment.drive = lookup(&segment.bone_name);
            if segment.drive.is_some() {
                bound += 1;
            }
        }
        bound
    }

    /// Is any segment backed by a joint drive?
    pub fn is_bound(&self) -> bool {
        self.segments.iter().any(|s| s.drive.is_some())
    }

    /// Hold every segment where it currently is
    pub fn freeze(&mut self) {
        for segment in &mut self.segments {
            segment.target = segment.current;
        }
    }

    fn index(finger: Finger, part: FingerPart) -> usize {
        let f = Finger::ALL.iter().position(|f| *f == finger).unwrap_or(0);
        let p = FingerPart::ALL.iter().position(|p| *p == part).unwrap_or(0);
        f * FingerPart::ALL.len() + p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_bone_names() {
        let left = FingerRig::new(Handedness::Left);
        assert_eq!(left.segments().count(), 15);
        assert_eq!(
            left.segment(Finger::Thumb, FingerPart::Proximal).bone_name,
            "thumb_01_l"
        );
        assert_eq!(
            left.segment(Finger::Ring, FingerPart::Intermediate).bone_name,
            "ring_02_l"
        );

        let right = FingerRig::new(Handedness::Right);
        assert_eq!(
            right.segment(Finger::Pinky, FingerPart::Distal).bone_name,
            "pinky_03_r"
        );
        assert_eq!(right.handedness(), Handedness::Right);
    }

    #[test]
    pub fn test_bind_drives() {
        let mut rig = FingerRig::new(Handedness::Left);
        assert!(!rig.is_bound());

        // A skeleton that only has an index finger
        let bound = rig.bind_drives(|name| {
            name.starts_with("index")
                .then(|| ImpulseJointHandle::from_raw_parts(name.len() as u32, 0))
        });
        assert_eq!(bound, 3);
        assert!(rig.is_bound());
        assert!(rig
            .segment(Finger::Index, FingerPart::Distal)
            .drive
            .is_some());
        assert!(rig.segment(Finger::Thumb, FingerPart::Distal).drive.is_none());
    }

    #[test]
    pub fn test_freeze() {
        let mut rig = FingerRig::new(Handedness::Left);
        let bent = Quat::from_rotation_x(0.7);
        for segment in rig.segments_mut() {
            segment.current = bent;
            segment.target = Quat::from_rotation_x(1.5);
        }

        rig.freeze();
        assert!(rig.segments().all(|s| s.target == bent));
    }
}
