//! Stand-ins for the daemon commands on platforms without an overlay
//! backend. `init` works everywhere; everything else needs Windows.

fn unsupported() -> ! {
    eprintln!("Error: the overlay currently runs on Windows only.");
    std::process::exit(1);
}

pub mod start {
    pub fn execute() {
        super::unsupported()
    }
}

pub mod stop {
    pub fn execute() {
        super::unsupported()
    }
}

pub mod status {
    pub fn execute() {
        super::unsupported()
    }
}

pub mod daemon {
    pub fn execute() {
        super::unsupported()
    }
}

pub mod action {
    pub fn execute(_action: overlay_core::Action) {
        super::unsupported()
    }
}

pub mod autostart {
    pub fn enable() {
        super::unsupported()
    }

    pub fn disable() {
        super::unsupported()
    }

    pub fn status() {
        super::unsupported()
    }
}
