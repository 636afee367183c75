//! Raw syscall crossing

/// Raw access to the sandbox syscalls.
///
/// Implementations return the status the other side reported; zero means
/// success. Status checking is the bridge's job.
pub trait Boundary {
    /// Issue a syscall that takes one input buffer
    fn send(&mut self, number: u64, data: &[u8]) -> i64;

    /// Issue the call syscall; the other side writes its answer into `result`
    fn exchange(&mut self, number: u64, result: &mut [u8], message: &[u8]) -> i64;
}

impl<B: Boundary + ?Sized> Boundary for &mut B {
    fn send(&mut self, number: u64, data: &[u8]) -> i64 {
        (**self).send(number, data)
    }

    fn exchange(&mut self, number: u64, result: &mut [u8], message: &[u8]) -> i64 {
        (**self).exchange(number, result, message)
    }
}

/// Syscalls issued with `ecall` on the RISC-V sandbox.
///
/// Arguments go in `a0`/`a1`, the number in `a7`, and the status comes back
/// in `a0`. The result buffer of the call syscall is passed without a length;
/// both sides agree on its size out of band.
#[cfg(target_arch = "riscv64")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EcallBoundary;

#[cfg(target_arch = "riscv64")]
impl EcallBoundary {
    unsafe fn ecall(number: u64, a0: u64, a1: u64) -> i64 {
        let mut ret = a0;
        core::arch::asm!(
            "ecall",
            inlateout("a0") ret,
            in("a1") a1,
            in("a2") 0u64,
            in("a3") 0u64,
            in("a4") 0u64,
            in("a5") 0u64,
            in("a7") number,
        );
        ret as i64
    }
}

#[cfg(target_arch = "riscv64")]
impl Boundary for EcallBoundary {
    fn send(&mut self, number: u64, data: &[u8]) -> i64 {
        // SAFETY: the pointer/length pair describes a live slice for the
        // duration of the syscall, and the other side only reads from it.
        unsafe { Self::ecall(number, data.as_ptr() as u64, data.len() as u64) }
    }

    fn exchange(&mut self, number: u64, result: &mut [u8], message: &[u8]) -> i64 {
        // SAFETY: both buffers outlive the blocking syscall; `result` is
        // uniquely borrowed while the other side writes into it.
        unsafe {
            Self::ecall(
                number,
                result.as_mut_ptr() as u64,
                message.as_ptr() as u64,
            )
        }
    }
}
