//! Byte-stream builders for unit tests

/// Little-endian writer producing osu!.db-shaped byte streams
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.raw(&value.to_le_bytes())
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.raw(&value.to_le_bytes())
    }

    pub fn i32(&mut self, value: i32) -> &mut Self {
        self.raw(&value.to_le_bytes())
    }

    pub fn u64(&mut self, value: u64) -> &mut Self {
        self.raw(&value.to_le_bytes())
    }

    pub fn f32(&mut self, value: f32) -> &mut Self {
        self.raw(&value.to_le_bytes())
    }

    pub fn f64(&mut self, value: f64) -> &mut Self {
        self.raw(&value.to_le_bytes())
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.u8(u8::from(value))
    }

    pub fn uleb128(&mut self, mut value: u64) -> &mut Self {
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            self.buf.push(byte);
            if value == 0 {
                break;
            }
        }
        self
    }

    /// `None` writes the 0x00 marker, `Some` writes 0x0b + length + bytes
    pub fn string(&mut self, value: Option<&str>) -> &mut Self {
        match value {
            None => self.u8(0x00),
            Some(s) => self.u8(0x0b).uleb128(s.len() as u64).raw(s.as_bytes()),
        }
    }

    pub fn ratings(&mut self, entries: &[(u32, f64)]) -> &mut Self {
        self.u32(entries.len() as u32);
        for &(mods, rating) in entries {
            self.u8(0x08).u32(mods).u8(0x0d).f64(rating);
        }
        self
    }

    pub fn timing_points(&mut self, points: &[(f64, f64, bool)]) -> &mut Self {
        self.u32(points.len() as u32);
        for &(bpm, offset, inherited) in points {
            self.f64(bpm).f64(offset).bool(inherited);
        }
        self
    }

    /// Write a full beatmap record laid out for `version`
    pub fn beatmap(&mut self, version: u32, fixture: &BeatmapFixture) -> &mut Self {
        let mut body = ByteWriter::new();
        body.string(fixture.artist)
            .string(None)
            .string(fixture.title)
            .string(None)
            .string(Some("Mapper"))
            .string(fixture.difficulty_name)
            .string(Some("audio.mp3"))
            .string(fixture.checksum)
            .string(Some("map.osu"))
            .u8(fixture.status)
            .u16(120)
            .u16(40)
            .u16(2)
            .u64(fixture.last_modified);

        if version < 20140609 {
            for value in fixture.byte_difficulty {
                body.u8(value);
            }
        } else {
            for value in fixture.float_difficulty {
                body.f32(value);
            }
        }

        body.f64(1.4)
            .ratings(&fixture.osu_ratings)
            .ratings(&fixture.taiko_ratings)
            .ratings(&fixture.catch_ratings)
            .ratings(&fixture.mania_ratings)
            .u32(95)
            .u32(101_000)
            .u32(40_000)
            .timing_points(&fixture.timing_points)
            .u32(fixture.difficulty_id)
            .u32(fixture.beatmap_id)
            .u32(0)
            .u8(9)
            .u8(9)
            .u8(9)
            .u8(9)
            .u16(0)
            .f32(0.7)
            .u8(fixture.mode)
            .string(Some("source"))
            .string(fixture.tags)
            .u16(0)
            .string(None)
            .bool(true)
            .u64(0)
            .bool(false)
            .string(fixture.folder_name)
            .u64(0)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false);

        if version < 20140609 {
            body.u16(fixture.legacy_field);
        }

        body.u32(0).u8(0);

        if version < 20191106 {
            self.u32(body.len() as u32);
        }
        self.raw(&body.buf)
    }
}

/// Knobs for [`ByteWriter::beatmap`]; everything else gets a fixed value
#[derive(Debug, Clone)]
pub struct BeatmapFixture {
    pub artist: Option<&'static str>,
    pub title: Option<&'static str>,
    pub difficulty_name: Option<&'static str>,
    pub checksum: Option<&'static str>,
    pub tags: Option<&'static str>,
    pub folder_name: Option<&'static str>,
    pub status: u8,
    pub last_modified: u64,
    pub byte_difficulty: [u8; 4],
    pub float_difficulty: [f32; 4],
    pub osu_ratings: Vec<(u32, f64)>,
    pub taiko_ratings: Vec<(u32, f64)>,
    pub catch_ratings: Vec<(u32, f64)>,
    pub mania_ratings: Vec<(u32, f64)>,
    pub timing_points: Vec<(f64, f64, bool)>,
    pub difficulty_id: u32,
    pub beatmap_id: u32,
    pub mode: u8,
    pub legacy_field: u16,
}

impl Default for BeatmapFixture {
    fn default() -> Self {
        Self {
            artist: Some("Artist"),
            title: Some("Title"),
            difficulty_name: Some("Insane"),
            checksum: Some("d41d8cd98f00b204e9800998ecf8427e"),
            tags: Some("tag1 tag2"),
            folder_name: Some("1 Artist - Title"),
            status: 4,
            last_modified: 0,
            byte_difficulty: [9, 4, 6, 8],
            float_difficulty: [9.3, 4.2, 6.0, 8.5],
            osu_ratings: Vec::new(),
            taiko_ratings: Vec::new(),
            catch_ratings: Vec::new(),
            mania_ratings: Vec::new(),
            timing_points: vec![(180.0, 0.0, false)],
            difficulty_id: 100,
            beatmap_id: 1,
            mode: 0,
            legacy_field: 0,
        }
    }
}
