//! Framebuffer device source backed by the Linux fbdev interface.
//!
//! This module opens a `/dev/fb*` node, reads its fixed and variable screen
//! information through the `FBIOGET_FSCREENINFO`/`FBIOGET_VSCREENINFO`
//! ioctls, and memory-maps the pixel region read-only. The kernel-reported
//! channel bitfields and line length become the `PixelLayout`; the panning
//! offsets become a fixed address bias applied to every read.

use std::fs::File;
use std::os::fd::AsRawFd;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};
use tracing::debug;

use crate::capture_pipeline::common::error::{CaptureError, Result};
use crate::capture_pipeline::source::layout::{ChannelField, PixelLayout};
use crate::capture_pipeline::source::provider::FrameSource;

/// FFI bindings for the fbdev ioctl interface, transcribed from
/// `<linux/fb.h>`; the `libc` crate does not ship these.
mod fb_ffi {
    pub const FBIOGET_VSCREENINFO: libc::c_ulong = 0x4600;
    pub const FBIOGET_FSCREENINFO: libc::c_ulong = 0x4602;

    #[repr(C)]
    #[derive(Clone, Copy)]
    pub struct fb_bitfield {
        pub offset: u32,
        pub length: u32,
        pub msb_right: u32,
    }

    #[repr(C)]
    #[derive(Clone, Copy)]
    pub struct fb_var_screeninfo {
        pub xres: u32,
        pub yres: u32,
        pub xres_virtual: u32,
        pub yres_virtual: u32,
        pub xoffset: u32,
        pub yoffset: u32,
        pub bits_per_pixel: u32,
        pub grayscale: u32,
        pub red: fb_bitfield,
        pub green: fb_bitfield,
        pub blue: fb_bitfield,
        pub transp: fb_bitfield,
        pub nonstd: u32,
        pub activate: u32,
        pub height: u32,
        pub width: u32,
        pub accel_flags: u32,
        pub pixclock: u32,
        pub left_margin: u32,
        pub right_margin: u32,
        pub upper_margin: u32,
        pub lower_margin: u32,
        pub hsync_len: u32,
        pub vsync_len: u32,
        pub sync: u32,
        pub vmode: u32,
        pub rotate: u32,
        pub colorspace: u32,
        pub reserved: [u32; 4],
    }

    #[repr(C)]
    #[derive(Clone, Copy)]
    pub struct fb_fix_screeninfo {
        pub id: [libc::c_char; 16],
        pub smem_start: libc::c_ulong,
        pub smem_len: u32,
        pub type_: u32,
        pub type_aux: u32,
        pub visual: u32,
        pub xpanstep: u16,
        pub ypanstep: u16,
        pub ywrapstep: u16,
        pub line_length: u32,
        pub mmio_start: libc::c_ulong,
        pub mmio_len: u32,
        pub accel: u32,
        pub capabilities: u16,
        pub reserved: [u16; 2],
    }
}

/// A memory-mapped framebuffer device.
///
/// The snapshot model is a single synchronous pass over a stable region: no
/// locking is taken against concurrent writers, so a display update during
/// the capture shows up as tearing in the output, not as an error.
pub struct FbDevice {
    map: Mmap,
    layout: PixelLayout,
    native_width: u32,
    native_height: u32,
    pan_x: u32,
    pan_y: u32,
}

impl FbDevice {
    /// Opens a framebuffer device node and maps its pixel memory.
    ///
    /// Fails with `DeviceError` when the node cannot be opened, either ioctl
    /// is refused, or the mapping fails, and with a configuration error when
    /// the reported pixel format is not a supported 16/24/32-bpp RGB layout.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            CaptureError::DeviceError(format!("cannot open {}: {}", path.display(), e))
        })?;
        let fd = file.as_raw_fd();

        let mut vinfo: fb_ffi::fb_var_screeninfo = unsafe { std::mem::zeroed() };
        if unsafe { libc::ioctl(fd, fb_ffi::FBIOGET_VSCREENINFO, &mut vinfo) } == -1 {
            return Err(CaptureError::DeviceError(format!(
                "reading variable screen information from {}: {}",
                path.display(),
                std::io::Error::last_os_error()
            )));
        }

        let mut finfo: fb_ffi::fb_fix_screeninfo = unsafe { std::mem::zeroed() };
        if unsafe { libc::ioctl(fd, fb_ffi::FBIOGET_FSCREENINFO, &mut finfo) } == -1 {
            return Err(CaptureError::DeviceError(format!(
                "reading fixed screen information from {}: {}",
                path.display(),
                std::io::Error::last_os_error()
            )));
        }

        debug!(
            "{}: {}x{} @ {} bpp, line length {} bytes, {} bytes mapped",
            path.display(),
            vinfo.xres,
            vinfo.yres,
            vinfo.bits_per_pixel,
            finfo.line_length,
            finfo.smem_len
        );

        let layout = PixelLayout::new(
            vinfo.bits_per_pixel,
            finfo.line_length as usize,
            ChannelField::new(vinfo.red.length, vinfo.red.offset),
            ChannelField::new(vinfo.green.length, vinfo.green.offset),
            ChannelField::new(vinfo.blue.length, vinfo.blue.offset),
        )?;

        // The map covers the whole screen memory, which includes any
        // virtual-resolution area the panning offsets point into.
        let map = unsafe {
            MmapOptions::new()
                .len(finfo.smem_len as usize)
                .map(&file)
                .map_err(|e| {
                    CaptureError::DeviceError(format!(
                        "failed to map {} to memory: {}",
                        path.display(),
                        e
                    ))
                })?
        };

        Ok(Self {
            map,
            layout,
            native_width: vinfo.xres,
            native_height: vinfo.yres,
            pan_x: vinfo.xoffset,
            pan_y: vinfo.yoffset,
        })
    }
}

impl FrameSource for FbDevice {
    fn native_width(&self) -> u32 {
        self.native_width
    }

    fn native_height(&self) -> u32 {
        self.native_height
    }

    fn layout(&self) -> &PixelLayout {
        &self.layout
    }

    fn read_pixel_word(&self, column: u32, row: u32) -> u32 {
        self.layout
            .read_word(&self.map, self.pan_x + column, self.pan_y + row)
    }
}
