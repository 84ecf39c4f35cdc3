pub mod bottle_vis3d;
