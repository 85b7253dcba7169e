use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::renderer::QuadVertex;

/// Exclusively-owned, hot-reloadable render pipeline built from a WGSL
/// file on disk.
///
/// Reload builds the replacement pipeline first and only commits on
/// success; a failed recompilation never leaves the viewer without a
/// usable shader.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    source_path: PathBuf,
}

impl ShaderProgram {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        surface_format: wgpu::TextureFormat,
        source_path: &Path,
    ) -> Result<Self> {
        let pipeline = Self::build_pipeline(device, layout, surface_format, source_path)?;
        Ok(Self {
            pipeline,
            source_path: source_path.to_path_buf(),
        })
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Recompile from the source file, swapping in the new pipeline only
    /// if the whole build succeeds. On failure the current pipeline stays
    /// bound and the error is returned to the caller.
    pub fn reload(
        &mut self,
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        surface_format: wgpu::TextureFormat,
    ) -> Result<()> {
        let candidate = Self::build_pipeline(device, layout, surface_format, &self.source_path)?;
        self.pipeline = candidate;
        Ok(())
    }

    fn build_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        surface_format: wgpu::TextureFormat,
        source_path: &Path,
    ) -> Result<wgpu::RenderPipeline> {
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("failed to read shader {}", source_path.display()))?;

        // Validation errors from wgpu surface through error scopes rather
        // than Results, so wrap both creation calls in one.
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Ray Tracing Shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Ray Tracing Pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[QuadVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            bail!(
                "shader {} failed to compile: {error}",
                source_path.display()
            );
        }

        Ok(pipeline)
    }
}
