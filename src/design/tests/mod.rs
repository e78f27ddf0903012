//! Properties that span the whole design pipeline rather than one stage.

mod fir_properties;
