//! # Mesh Handle
//!
//! WASM-friendly wrapper for mesh data that can be transferred to JavaScript.

use lamp_kernel::{Mesh, MeshBuffers};
use wasm_bindgen::prelude::*;

/// A handle to mesh data that can be accessed from JavaScript.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const mesh = generate_shell(JSON.stringify({ pattern: "voronoi" }));
///
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(mesh.vertices(), 3));
/// geometry.setAttribute('normal', new THREE.BufferAttribute(mesh.normals(), 3));
/// geometry.setIndex(new THREE.BufferAttribute(mesh.indices(), 1));
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MeshHandle {
    buffers: MeshBuffers,
}

#[wasm_bindgen]
impl MeshHandle {
    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        u32::try_from(self.buffers.vertex_count()).unwrap_or(u32::MAX)
    }

    /// Returns the number of triangles.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        u32::try_from(self.buffers.triangle_count()).unwrap_or(u32::MAX)
    }

    /// Returns the vertex positions as a Float32Array.
    ///
    /// Format: [x, y, z, x, y, z, ...]
    #[wasm_bindgen]
    pub fn vertices(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.buffers.vertices[..])
    }

    /// Returns the triangle indices as a Uint32Array.
    #[wasm_bindgen]
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.buffers.indices[..])
    }

    /// Returns the vertex normals as a Float32Array, if available.
    #[wasm_bindgen]
    pub fn normals(&self) -> Option<js_sys::Float32Array> {
        self.buffers
            .normals
            .as_ref()
            .map(|n| js_sys::Float32Array::from(&n[..]))
    }

    #[wasm_bindgen]
    pub fn has_normals(&self) -> bool {
        self.buffers.normals.is_some()
    }

    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.buffers.vertices.is_empty()
    }
}

impl MeshHandle {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            buffers: MeshBuffers::from(mesh),
        }
    }

    /// Native access to the flat buffers.
    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }
}
