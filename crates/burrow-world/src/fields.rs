use burrow_registry::BiomeId;

/// One cell of the 2D overworld input: the finished product of the overworld
/// map generator, consumed here read-only.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldCell {
    pub biome: BiomeId,
    /// Normalized terrain height in 0..1.
    pub height: f32,
    pub temperature: f32,
    pub rainfall: f32,
}

/// 2D biome/height/temperature/rainfall fields at a coarser resolution than
/// the voxel grid. Height/temperature/rainfall sample bilinearly; biome
/// lookup snaps to the nearest cell.
#[derive(Clone, Debug)]
pub struct OverworldMap {
    width: usize,
    depth: usize,
    cell_size: f32,
    cells: Vec<FieldCell>,
}

impl OverworldMap {
    pub fn new(width: usize, depth: usize, cell_size: f32) -> Self {
        Self {
            width: width.max(1),
            depth: depth.max(1),
            cell_size: cell_size.max(0.0001),
            cells: vec![FieldCell::default(); width.max(1) * depth.max(1)],
        }
    }

    pub fn from_fn(
        width: usize,
        depth: usize,
        cell_size: f32,
        mut f: impl FnMut(usize, usize) -> FieldCell,
    ) -> Self {
        let mut map = Self::new(width, depth, cell_size);
        for cz in 0..map.depth {
            for cx in 0..map.width {
                map.cells[cz * map.width + cx] = f(cx, cz);
            }
        }
        map
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    fn cell(&self, cx: usize, cz: usize) -> &FieldCell {
        let cx = cx.min(self.width - 1);
        let cz = cz.min(self.depth - 1);
        &self.cells[cz * self.width + cx]
    }

    pub fn set_cell(&mut self, cx: usize, cz: usize, cell: FieldCell) {
        if cx < self.width && cz < self.depth {
            self.cells[cz * self.width + cx] = cell;
        }
    }

    #[inline]
    pub fn cells(&self) -> &[FieldCell] {
        &self.cells
    }

    /// Map a world coordinate into continuous field space, clamped to the
    /// field's extent.
    #[inline]
    fn field_pos(&self, w: i32, extent: usize) -> f32 {
        let p = w.max(0) as f32 / self.cell_size;
        p.min(extent as f32 - 1.0)
    }

    pub fn biome_at(&self, wx: i32, wz: i32) -> BiomeId {
        let fx = self.field_pos(wx, self.width).round() as usize;
        let fz = self.field_pos(wz, self.depth).round() as usize;
        self.cell(fx, fz).biome
    }

    pub fn height_at(&self, wx: i32, wz: i32) -> f32 {
        self.bilinear(wx, wz, |c| c.height).clamp(0.0, 1.0)
    }

    pub fn temperature_at(&self, wx: i32, wz: i32) -> f32 {
        self.bilinear(wx, wz, |c| c.temperature)
    }

    pub fn rainfall_at(&self, wx: i32, wz: i32) -> f32 {
        self.bilinear(wx, wz, |c| c.rainfall)
    }

    fn bilinear(&self, wx: i32, wz: i32, pick: impl Fn(&FieldCell) -> f32) -> f32 {
        let fx = self.field_pos(wx, self.width);
        let fz = self.field_pos(wz, self.depth);
        let x0 = fx.floor() as usize;
        let z0 = fz.floor() as usize;
        let tx = fx - x0 as f32;
        let tz = fz - z0 as f32;
        let v00 = pick(self.cell(x0, z0));
        let v10 = pick(self.cell(x0 + 1, z0));
        let v01 = pick(self.cell(x0, z0 + 1));
        let v11 = pick(self.cell(x0 + 1, z0 + 1));
        let a = v00 + (v10 - v00) * tx;
        let b = v01 + (v11 - v01) * tx;
        a + (b - a) * tz
    }
}
