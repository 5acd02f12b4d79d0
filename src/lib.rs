pub mod error;

pub mod service {
    pub mod config_service;
    pub mod docx;
    pub mod file;
    pub mod html;
    pub mod markdown;
    pub mod office;
    pub mod pdf;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod facade {
    pub mod conversion_facade;
    pub mod ports {
        pub mod facade_ports;
    }
    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod models {
    pub mod conversion;
    pub mod format;
}

pub mod action {
    pub mod cli;
}

pub mod utils {
    pub mod utils;
}
