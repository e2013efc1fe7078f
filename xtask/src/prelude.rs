pub use rtbf_client::output::style::{
    aeprintln, aprintln, banner_blue, banner_green, p_b, p_c, p_g, p_r, p_y,
};
