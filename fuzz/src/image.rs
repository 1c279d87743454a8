#![no_main]

use libfuzzer_sys::fuzz_target;
use ls8::{Cpu, EmptyDevice, Error, MEMORY_SIZE};

fuzz_target!(|data: &[u8]| {
    let Ok(mut cpu) = Cpu::with_image(data) else {
        assert!(data.len() > MEMORY_SIZE);
        return;
    };

    // Arbitrary images may loop forever, so give up after 65K cycles
    let r = cpu.run_until(&mut EmptyDevice, |_cpu, i| i > 65536);
    match r {
        Ok(Some(_)) => assert!(!cpu.is_running()),
        Ok(None) => assert!(cpu.is_running()),
        Err(Error::Output(e)) => panic!("empty device failed: {e}"),
        Err(_) => {
            // Faults leave the machine pointing at the faulting instruction
            assert!(cpu.is_running());
            assert!(cpu.pc() <= MEMORY_SIZE);
        }
    }
});
