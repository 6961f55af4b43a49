//! Voxel cell state, chunk buffers, and the world-spanning grid.
#![forbid(unsafe_code)]

use burrow_registry::{DecorId, EMPTY, VoxelId};
use burrow_world::{CHUNK_SIZE, ChunkCoord};

pub const MAX_LIQUID_LEVEL: u8 = 7;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Liquid {
    #[default]
    None,
    Water,
    Lava,
}

/// One cell of the world grid. `level > 0` implies `id == EMPTY`: liquid
/// occupies open space, never a solid voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Voxel {
    pub id: VoxelId,
    pub liquid: Liquid,
    pub level: u8,
    pub grass: DecorId,
    pub flags: u8,
}

impl Voxel {
    pub const SUNLIT: u8 = 1 << 0;
    pub const EXPLORED: u8 = 1 << 1;
    pub const PLAYER_BUILT: u8 = 1 << 2;

    pub const AIR: Voxel = Voxel {
        id: EMPTY,
        liquid: Liquid::None,
        level: 0,
        grass: 0,
        flags: 0,
    };

    #[inline]
    pub fn solid(id: VoxelId) -> Voxel {
        Voxel {
            id,
            ..Voxel::AIR
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.id == EMPTY
    }

    #[inline]
    pub fn sunlit(self) -> bool {
        self.flags & Self::SUNLIT != 0
    }

    #[inline]
    pub fn explored(self) -> bool {
        self.flags & Self::EXPLORED != 0
    }

    #[inline]
    pub fn player_built(self) -> bool {
        self.flags & Self::PLAYER_BUILT != 0
    }

    /// Carve to empty space, dropping material, grass, and liquid but
    /// keeping the lighting flags.
    #[inline]
    pub fn carve(&mut self) {
        self.id = EMPTY;
        self.grass = 0;
        self.liquid = Liquid::None;
        self.level = 0;
    }

    /// Fill open space with liquid at full level.
    #[inline]
    pub fn fill_liquid(&mut self, kind: Liquid) {
        debug_assert!(self.is_empty());
        self.liquid = kind;
        self.level = MAX_LIQUID_LEVEL;
    }

    /// Turn the cell into a solid material, clearing any liquid.
    #[inline]
    pub fn paint(&mut self, id: VoxelId) {
        self.id = id;
        self.liquid = Liquid::None;
        self.level = 0;
    }
}

#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    pub voxels: Vec<Voxel>,
}

impl ChunkBuf {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            sx: CHUNK_SIZE,
            sy: CHUNK_SIZE,
            sz: CHUNK_SIZE,
            voxels: vec![Voxel::AIR; CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE],
        }
    }

    pub fn from_voxels_local(
        coord: ChunkCoord,
        sx: usize,
        sy: usize,
        sz: usize,
        voxels: Vec<Voxel>,
    ) -> Self {
        let mut v = voxels;
        let expect = sx * sy * sz;
        if v.len() != expect {
            v.resize(expect, Voxel::AIR);
        }
        ChunkBuf {
            coord,
            sx,
            sy,
            sz,
            voxels: v,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Voxel {
        self.voxels[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, v: Voxel) {
        let i = self.idx(x, y, z);
        self.voxels[i] = v;
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        let base_x = self.coord.cx * self.sx as i32;
        let base_y = self.coord.cy * self.sy as i32;
        let base_z = self.coord.cz * self.sz as i32;
        if wy < base_y || wy >= base_y + self.sy as i32 {
            return false;
        }
        wx >= base_x && wx < base_x + self.sx as i32 && wz >= base_z && wz < base_z + self.sz as i32
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Voxel> {
        if !self.contains_world(wx, wy, wz) {
            return None;
        }
        let base_x = self.coord.cx * self.sx as i32;
        let base_y = self.coord.cy * self.sy as i32;
        let base_z = self.coord.cz * self.sz as i32;
        Some(self.get_local(
            (wx - base_x) as usize,
            (wy - base_y) as usize,
            (wz - base_z) as usize,
        ))
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.voxels.iter().any(|v| *v != Voxel::AIR)
    }
}

/// Dense store of every chunk in the target volume. Chunks are laid out so
/// each vertical stack is contiguous: `chunks[stack * chunks_y + cy]`, with
/// `stack = cz * chunks_x + cx`. Lighting splits the slice per stack.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    chunks_x: usize,
    chunks_y: usize,
    chunks_z: usize,
    chunks: Vec<ChunkBuf>,
}

impl VoxelGrid {
    pub fn new(chunks_x: usize, chunks_y: usize, chunks_z: usize) -> Self {
        let mut chunks = Vec::with_capacity(chunks_x * chunks_y * chunks_z);
        for cz in 0..chunks_z {
            for cx in 0..chunks_x {
                for cy in 0..chunks_y {
                    chunks.push(ChunkBuf::new(ChunkCoord::new(
                        cx as i32, cy as i32, cz as i32,
                    )));
                }
            }
        }
        Self {
            chunks_x,
            chunks_y,
            chunks_z,
            chunks,
        }
    }

    #[inline]
    pub fn size_x(&self) -> usize {
        self.chunks_x * CHUNK_SIZE
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.chunks_y * CHUNK_SIZE
    }

    #[inline]
    pub fn size_z(&self) -> usize {
        self.chunks_z * CHUNK_SIZE
    }

    #[inline]
    fn chunk_index(&self, cx: usize, cy: usize, cz: usize) -> usize {
        (cz * self.chunks_x + cx) * self.chunks_y + cy
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&ChunkBuf> {
        if coord.cx < 0 || coord.cy < 0 || coord.cz < 0 {
            return None;
        }
        let (cx, cy, cz) = (coord.cx as usize, coord.cy as usize, coord.cz as usize);
        if cx >= self.chunks_x || cy >= self.chunks_y || cz >= self.chunks_z {
            return None;
        }
        Some(&self.chunks[self.chunk_index(cx, cy, cz)])
    }

    pub fn chunks(&self) -> &[ChunkBuf] {
        &self.chunks
    }

    pub fn chunks_mut(&mut self) -> &mut [ChunkBuf] {
        &mut self.chunks
    }

    /// Number of chunks in one vertical stack; `chunks_mut()` split into
    /// runs of this length yields whole columns of the world.
    #[inline]
    pub fn stack_len(&self) -> usize {
        self.chunks_y
    }

    #[inline]
    pub fn contains(&self, wx: i32, wy: i32, wz: i32) -> bool {
        wx >= 0
            && wy >= 0
            && wz >= 0
            && (wx as usize) < self.size_x()
            && (wy as usize) < self.height()
            && (wz as usize) < self.size_z()
    }

    /// World-coordinate read; `None` is the invalid-handle sentinel for
    /// anything outside the generated volume.
    #[inline]
    pub fn get(&self, wx: i32, wy: i32, wz: i32) -> Option<Voxel> {
        if !self.contains(wx, wy, wz) {
            return None;
        }
        let (cx, lx) = (wx as usize / CHUNK_SIZE, wx as usize % CHUNK_SIZE);
        let (cy, ly) = (wy as usize / CHUNK_SIZE, wy as usize % CHUNK_SIZE);
        let (cz, lz) = (wz as usize / CHUNK_SIZE, wz as usize % CHUNK_SIZE);
        Some(self.chunks[self.chunk_index(cx, cy, cz)].get_local(lx, ly, lz))
    }

    /// World-coordinate write; silently ignored outside the volume.
    #[inline]
    pub fn set(&mut self, wx: i32, wy: i32, wz: i32, v: Voxel) -> bool {
        self.update(wx, wy, wz, |cell| *cell = v)
    }

    #[inline]
    pub fn update(&mut self, wx: i32, wy: i32, wz: i32, f: impl FnOnce(&mut Voxel)) -> bool {
        if !self.contains(wx, wy, wz) {
            return false;
        }
        let (cx, lx) = (wx as usize / CHUNK_SIZE, wx as usize % CHUNK_SIZE);
        let (cy, ly) = (wy as usize / CHUNK_SIZE, wy as usize % CHUNK_SIZE);
        let (cz, lz) = (wz as usize / CHUNK_SIZE, wz as usize % CHUNK_SIZE);
        let idx = self.chunk_index(cx, cy, cz);
        let chunk = &mut self.chunks[idx];
        let i = chunk.idx(lx, ly, lz);
        f(&mut chunk.voxels[i]);
        true
    }

    /// Highest solid (non-empty) voxel in the column, scanning from the top.
    pub fn top_solid_y(&self, wx: i32, wz: i32) -> Option<i32> {
        if wx < 0 || wz < 0 || wx as usize >= self.size_x() || wz as usize >= self.size_z() {
            return None;
        }
        for wy in (0..self.height() as i32).rev() {
            if let Some(v) = self.get(wx, wy, wz) {
                if !v.is_empty() {
                    return Some(wy);
                }
            }
        }
        None
    }
}
