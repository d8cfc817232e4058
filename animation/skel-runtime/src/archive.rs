//! Little-endian binary archives of runtime animations and skeletons.
//!
//! Every archive starts with a four byte magic and a `u32` version:
//!
//! | Object | Magic | Version |
//! |---|---|---|
//! | [`Animation`] | `SKAN` | 1 |
//! | [`Skeleton`] | `SKSK` | 1 |
//!
//! Animation body: name, duration `f32`, track count `u16`, then the
//! translation, rotation and scale key sections. Each section is a `u32`
//! count followed by the keys in `(time, track)` order.
//!
//! Skeleton body: joint count `u32`, then per joint its parent `i16`, name
//! and bind pose translation, rotation and scale as `f32`s.
//!
//! Strings are a `u32` byte length followed by UTF-8 bytes.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;
use skel_math::{JointTransform, QuantizedQuaternion, SoaTransform, soa_count};

use crate::animation::{Animation, Float3Key, Keyframe, MAX_TRACKS, QuaternionKey};
use crate::error::{Result, RuntimeError};
use crate::skeleton::{MAX_JOINTS, Skeleton};

/// Longest accepted string, in bytes.
const MAX_STRING_LEN: usize = 64 * 1024;

/// Upper bound of a key section preallocation.
const MAX_PREALLOCATED_KEYS: usize = 1 << 16;

/// Bit of a rotation key track field holding the sign of w.
const W_SIGN_BIT: u16 = 0x8000;

/// An object stored in a self-describing binary archive.
pub trait Archive: Sized {
    /// Archive magic bytes
    fn magic() -> &'static [u8; 4];

    /// Current body version
    fn version() -> u32 {
        1
    }

    /// Read the body, after magic and version have been checked
    fn read_body(reader: &mut impl Read) -> Result<Self>;

    /// Write the body
    fn write_body(&self, writer: &mut impl Write) -> Result<()>;

    /// Read a complete archive
    fn read(reader: &mut impl Read) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != Self::magic() {
            return Err(RuntimeError::InvalidMagic {
                expected: String::from_utf8_lossy(Self::magic()).into_owned(),
                actual: String::from_utf8_lossy(&magic).into_owned(),
            });
        }
        let version = reader.read_u32::<LittleEndian>()?;
        if version != Self::version() {
            return Err(RuntimeError::UnsupportedVersion(version));
        }
        Self::read_body(reader)
    }

    /// Write a complete archive
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(Self::magic())?;
        writer.write_u32::<LittleEndian>(Self::version())?;
        self.write_body(writer)
    }

    /// Read an archive from a file
    fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading archive {}", path.display());
        let mut reader = BufReader::new(File::open(path)?);
        Self::read(&mut reader)
    }

    /// Write an archive to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("Writing archive {}", path.display());
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn read_string(reader: &mut impl Read) -> Result<String> {
    let len = reader.read_u32::<LittleEndian>()? as usize;
    if len > MAX_STRING_LEN {
        return Err(RuntimeError::CorruptedArchive(format!(
            "string of {len} bytes"
        )));
    }
    let mut bytes = vec![0u8; len];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|e| RuntimeError::CorruptedArchive(format!("invalid UTF-8 string: {e}")))
}

fn write_string(writer: &mut impl Write, s: &str) -> Result<()> {
    writer.write_u32::<LittleEndian>(s.len() as u32)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

/// Reads an element count, rejecting counts above `limit`.
fn read_count(reader: &mut impl Read, what: &str, limit: usize) -> Result<usize> {
    let count = reader.read_u32::<LittleEndian>()? as usize;
    if count > limit {
        return Err(RuntimeError::CorruptedArchive(format!(
            "{count} {what} exceed the limit of {limit}"
        )));
    }
    Ok(count)
}

fn read_f32x<const N: usize>(reader: &mut impl Read) -> Result<[f32; N]> {
    let mut values = [0.0; N];
    reader.read_f32_into::<LittleEndian>(&mut values)?;
    Ok(values)
}

fn read_float3_keys(reader: &mut impl Read) -> Result<Vec<Float3Key>> {
    let count = reader.read_u32::<LittleEndian>()? as usize;
    let mut keys = Vec::with_capacity(count.min(MAX_PREALLOCATED_KEYS));
    for _ in 0..count {
        let time = reader.read_f32::<LittleEndian>()?;
        let track = reader.read_u16::<LittleEndian>()?;
        let mut value = [0u16; 3];
        reader.read_u16_into::<LittleEndian>(&mut value)?;
        keys.push(Float3Key::new(time, track, value));
    }
    Ok(keys)
}

fn write_float3_keys(writer: &mut impl Write, keys: &[Float3Key]) -> Result<()> {
    writer.write_u32::<LittleEndian>(keys.len() as u32)?;
    for key in keys {
        writer.write_f32::<LittleEndian>(key.time())?;
        writer.write_u16::<LittleEndian>(key.track)?;
        for v in key.value {
            writer.write_u16::<LittleEndian>(v)?;
        }
    }
    Ok(())
}

fn read_quaternion_keys(reader: &mut impl Read) -> Result<Vec<QuaternionKey>> {
    let count = reader.read_u32::<LittleEndian>()? as usize;
    let mut keys = Vec::with_capacity(count.min(MAX_PREALLOCATED_KEYS));
    for _ in 0..count {
        let time = reader.read_f32::<LittleEndian>()?;
        let track_and_sign = reader.read_u16::<LittleEndian>()?;
        let mut value = [0i16; 3];
        reader.read_i16_into::<LittleEndian>(&mut value)?;
        let rotation = QuantizedQuaternion {
            value,
            w_sign: track_and_sign & W_SIGN_BIT != 0,
        };
        keys.push(QuaternionKey::new(time, track_and_sign & !W_SIGN_BIT, rotation));
    }
    Ok(keys)
}

fn write_quaternion_keys(writer: &mut impl Write, keys: &[QuaternionKey]) -> Result<()> {
    writer.write_u32::<LittleEndian>(keys.len() as u32)?;
    for key in keys {
        let sign = if key.rotation.w_sign { W_SIGN_BIT } else { 0 };
        writer.write_f32::<LittleEndian>(key.time())?;
        writer.write_u16::<LittleEndian>(key.track | sign)?;
        for v in key.rotation.value {
            writer.write_i16::<LittleEndian>(v)?;
        }
    }
    Ok(())
}

impl Archive for Animation {
    fn magic() -> &'static [u8; 4] {
        b"SKAN"
    }

    fn read_body(reader: &mut impl Read) -> Result<Self> {
        let name = read_string(reader)?;
        let duration = reader.read_f32::<LittleEndian>()?;
        let num_tracks = usize::from(reader.read_u16::<LittleEndian>()?);
        if num_tracks > MAX_TRACKS {
            return Err(RuntimeError::CorruptedArchive(format!(
                "{num_tracks} tracks exceed the maximum of {MAX_TRACKS}"
            )));
        }

        let translations = read_float3_keys(reader)?;
        let rotations = read_quaternion_keys(reader)?;
        let scales = read_float3_keys(reader)?;
        debug!(
            "Read animation '{name}': {} + {} + {} keys",
            translations.len(),
            rotations.len(),
            scales.len()
        );

        Animation::new(name, duration, num_tracks, translations, rotations, scales)
            .map_err(|e| RuntimeError::CorruptedArchive(e.to_string()))
    }

    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        write_string(writer, self.name())?;
        writer.write_f32::<LittleEndian>(self.duration())?;
        writer.write_u16::<LittleEndian>(self.num_tracks() as u16)?;
        write_float3_keys(writer, self.translations())?;
        write_quaternion_keys(writer, self.rotations())?;
        write_float3_keys(writer, self.scales())?;
        Ok(())
    }
}

impl Archive for Skeleton {
    fn magic() -> &'static [u8; 4] {
        b"SKSK"
    }

    fn read_body(reader: &mut impl Read) -> Result<Self> {
        let num_joints = read_count(reader, "joints", MAX_JOINTS)?;
        let mut names = Vec::with_capacity(num_joints);
        let mut parents = Vec::with_capacity(num_joints);
        let mut bind_pose = vec![SoaTransform::IDENTITY; soa_count(num_joints)];

        for joint in 0..num_joints {
            parents.push(reader.read_i16::<LittleEndian>()?);
            names.push(read_string(reader)?);
            let transform = JointTransform {
                translation: read_f32x(reader)?,
                rotation: read_f32x(reader)?,
                scale: read_f32x(reader)?,
            };
            bind_pose[joint / 4].set_lane(joint % 4, &transform);
        }
        debug!("Read skeleton with {num_joints} joints");

        Skeleton::new(names, parents, bind_pose)
            .map_err(|e| RuntimeError::CorruptedArchive(e.to_string()))
    }

    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_u32::<LittleEndian>(self.num_joints() as u32)?;
        for (joint, (parent, name)) in self
            .joint_parents()
            .iter()
            .zip(self.joint_names())
            .enumerate()
        {
            writer.write_i16::<LittleEndian>(*parent)?;
            write_string(writer, name)?;
            let transform = self.bind_pose()[joint / 4].lane(joint % 4);
            let values = transform
                .translation
                .iter()
                .chain(&transform.rotation)
                .chain(&transform.scale);
            for v in values {
                writer.write_f32::<LittleEndian>(*v)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::tests::identity_keys;
    use crate::skeleton::tests::sample_skeleton;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn sample_animation() -> Animation {
        let (t, mut r, s) = identity_keys(2, 1.5);
        let half = std::f32::consts::FRAC_1_SQRT_2;
        r[5] = QuaternionKey::new(
            1.5,
            1,
            QuantizedQuaternion::quantize(skel_math::SimdFloat4::load(0.0, -half, 0.0, -half)),
        );
        Animation::new("walk", 1.5, 2, t, r, s).expect("valid animation")
    }

    #[test]
    fn test_animation_round_trip() {
        let animation = sample_animation();
        let mut bytes = Vec::new();
        animation.write(&mut bytes).expect("write succeeds");
        assert_eq!(&bytes[..4], b"SKAN");

        let read = Animation::read(&mut Cursor::new(bytes)).expect("read succeeds");
        assert_eq!(read.name(), "walk");
        assert_eq!(read.duration(), 1.5);
        assert_eq!(read.num_tracks(), 2);
        assert_eq!(read.translations(), animation.translations());
        assert_eq!(read.rotations(), animation.rotations());
        assert_eq!(read.scales(), animation.scales());
        assert!(read.rotations()[5].rotation.w_sign);
        assert_ne!(read.id(), animation.id());
    }

    #[test]
    fn test_skeleton_round_trip() {
        let skeleton = sample_skeleton();
        let mut bytes = Vec::new();
        skeleton.write(&mut bytes).expect("write succeeds");
        let read = Skeleton::read(&mut Cursor::new(bytes)).expect("read succeeds");
        assert_eq!(read, skeleton);
    }

    #[test]
    fn test_rejects_wrong_magic_and_version() {
        let mut bytes = Vec::new();
        sample_skeleton().write(&mut bytes).expect("write succeeds");
        let err = Animation::read(&mut Cursor::new(bytes.clone())).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidMagic { .. }), "{err}");

        bytes[4] = 9;
        let err = Skeleton::read(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, RuntimeError::UnsupportedVersion(9)), "{err}");
    }

    #[test]
    fn test_rejects_corrupted_content() {
        let mut bytes = Vec::new();
        sample_skeleton().write(&mut bytes).expect("write succeeds");
        // First joint's parent points forward.
        bytes[12..14].copy_from_slice(&3i16.to_le_bytes());
        let err = Skeleton::read(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, RuntimeError::CorruptedArchive(_)), "{err}");

        let mut bytes = Vec::new();
        sample_skeleton().write(&mut bytes).expect("write succeeds");
        // Rotation w of the first joint, after header, joint count, parent,
        // name "root" and translation.
        let offset = 8 + 4 + 2 + 4 + 4 + 12 + 12;
        bytes[offset..offset + 4].copy_from_slice(&2.0f32.to_le_bytes());
        let err = Skeleton::read(&mut Cursor::new(bytes)).unwrap_err();
        assert!(err.to_string().contains("not normalized"), "{err}");

        let mut bytes = Vec::new();
        sample_animation().write(&mut bytes).expect("write succeeds");
        // Track index of the first translation key, after header, name,
        // duration, track count, key count and key time.
        let offset = 8 + 4 + 4 + 4 + 2 + 4 + 4;
        bytes[offset..offset + 2].copy_from_slice(&200u16.to_le_bytes());
        let err = Animation::read(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, RuntimeError::CorruptedArchive(_)), "{err}");
    }

    #[test]
    fn test_truncated_archive_is_io_error() {
        let mut bytes = Vec::new();
        sample_animation().write(&mut bytes).expect("write succeeds");
        bytes.truncate(bytes.len() - 3);
        let err = Animation::read(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, RuntimeError::Io(_)), "{err}");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("walk.skan");
        let animation = sample_animation();
        animation.save(&path).expect("save succeeds");
        let read = Animation::from_path(&path).expect("load succeeds");
        assert_eq!(read.rotations(), animation.rotations());
    }
}
