//! Sunlight propagation: top-down column flood across stacked chunks.
#![forbid(unsafe_code)]

use burrow_chunk::{ChunkBuf, Voxel, VoxelGrid};
use burrow_registry::VoxelTypeRegistry;
use rayon::prelude::*;


/// Mark `SUNLIT|EXPLORED` down every column of the world, through and
/// including the first opaque cell; everything below keeps its prior state.
/// Columns span all vertically stacked chunks, so this runs over whole
/// stacks in parallel.
pub fn propagate_sunlight(grid: &mut VoxelGrid, types: &VoxelTypeRegistry) {
    let stack = grid.stack_len();
    grid.chunks_mut()
        .par_chunks_mut(stack)
        .for_each(|chunks| propagate_stack(chunks, types));
}

/// Single-chunk variant for isolated chunk generation: the column scan is
/// confined to this chunk's vertical extent.
pub fn propagate_chunk(buf: &mut ChunkBuf, types: &VoxelTypeRegistry) {
    propagate_stack(std::slice::from_mut(buf), types);
}

fn propagate_stack(stack: &mut [ChunkBuf], types: &VoxelTypeRegistry) {
    let Some(first) = stack.first() else {
        return;
    };
    let (sx, sz) = (first.sx, first.sz);
    for z in 0..sz {
        for x in 0..sx {
            // stack[0] is the bottom chunk; walk from the sky down.
            'column: for chunk in stack.iter_mut().rev() {
                for y in (0..chunk.sy).rev() {
                    let i = chunk.idx(x, y, z);
                    let v = &mut chunk.voxels[i];
                    v.flags |= Voxel::SUNLIT | Voxel::EXPLORED;
                    if types.is_opaque(v.id) {
                        break 'column;
                    }
                }
            }
        }
    }
}
