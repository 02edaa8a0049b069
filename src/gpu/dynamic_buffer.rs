//! Growable GPU buffers for per-frame instance data.
//!
//! Instance counts change as objects are added or labels appear, so the
//! buffer doubles its capacity whenever a write does not fit and never
//! shrinks.

use std::marker::PhantomData;

/// Smallest allocation, in bytes.
const MIN_CAPACITY: u64 = 256;

/// A GPU buffer of `T` items that grows on demand.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    /// Capacity in bytes.
    capacity: u64,
    /// Items written by the last [`write`](Self::write).
    count: u32,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let bytes = (size_of::<T>() * capacity) as u64;
        let capacity = bytes.max(MIN_CAPACITY);
        Self {
            buffer: Self::allocate(device, label, capacity, usage),
            capacity,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        size: u64,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload `data`, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups that
    /// reference it need recreation).
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = bytes.len() as u64;

        let reallocated = needed > self.capacity;
        if reallocated {
            let capacity = (needed * 2).max(self.capacity * 2);
            log::debug!(
                "{}: growing {} -> {} bytes",
                self.label,
                self.capacity,
                capacity
            );
            self.buffer =
                Self::allocate(device, &self.label, capacity, self.usage);
            self.capacity = capacity;
        }

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len() as u32;
        reallocated
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items written by the last upload.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The written portion of the buffer, for vertex binding.
    #[must_use]
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        let used = u64::from(self.count) * size_of::<T>() as u64;
        self.buffer.slice(..used.max(1).min(self.capacity))
    }
}
