//! 3x3 homogeneous matrices for 2D affine transforms.
//!
//! Pure value math with no rendering dependencies: every operation returns a
//! fresh matrix and never touches its inputs. Chained composition is
//! right-multiplication, so
//! `Mat3::projection(w, h).translate(tx, ty).rotate(a).scale(sx, sy)`
//! applied to a point scales first, then rotates, then translates, then
//! projects into clip space.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    // Row-major 3x3 matrix. Points transform as column vectors: p' = M * p.
    e: [f32; 9],
}

impl Mat3 {
    pub const fn identity() -> Self {
        Self {
            e: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Constructs a matrix from its nine elements in row-major order.
    pub const fn from_rows(e: [f32; 9]) -> Self {
        Self { e }
    }

    /// Maps pixel space (origin top-left, y down, extents
    /// `[0,width] x [0,height]`) into clip space `[-1,1] x [-1,1]` with the
    /// y axis flipped, so `(0,0)` lands at `(-1,1)` and `(width,height)` at
    /// `(1,-1)`.
    ///
    /// Zero extents divide to non-finite values; callers guard upstream.
    pub fn projection(width: f32, height: f32) -> Self {
        Self {
            e: [
                2.0 / width, 0.0, -1.0,
                0.0, -2.0 / height, 1.0,
                0.0, 0.0, 1.0,
            ],
        }
    }

    /// Translation by `(tx, ty)`.
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self {
            e: [1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0],
        }
    }

    /// Counter-clockwise rotation by `angle` radians (in a y-up frame).
    /// Any real angle is accepted; the trig functions wrap it.
    pub fn rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            e: [c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Scaling by `(sx, sy)`. Negative factors mirror; zero collapses the
    /// transform to a line or point, which is allowed.
    pub const fn scaling(sx: f32, sy: f32) -> Self {
        Self {
            e: [sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Standard row-major product `self * rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let a = &self.e;
        let b = &rhs.e;
        let mut e = [0.0; 9];
        for r in 0..3 {
            for c in 0..3 {
                e[r * 3 + c] = a[r * 3] * b[c]
                    + a[r * 3 + 1] * b[3 + c]
                    + a[r * 3 + 2] * b[6 + c];
            }
        }
        Self { e }
    }

    /// Returns `self * T(tx, ty)`: the translation happens in this matrix's
    /// local frame, before whatever `self` already does.
    pub fn translate(&self, tx: f32, ty: f32) -> Self {
        self.multiply(&Self::translation(tx, ty))
    }

    /// Returns `self * R(angle)`.
    pub fn rotate(&self, angle: f32) -> Self {
        self.multiply(&Self::rotation(angle))
    }

    /// Returns `self * S(sx, sy)`.
    pub fn scale(&self, sx: f32, sy: f32) -> Self {
        self.multiply(&Self::scaling(sx, sy))
    }

    /// Applies this transform to a 2D point (implicitly using homogeneous
    /// `w = 1`).
    #[inline]
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let e = &self.e;
        (
            e[0] * x + e[1] * y + e[2],
            e[3] * x + e[4] * y + e[5],
        )
    }

    /// The elements in row-major order, as stored.
    pub const fn to_rows(&self) -> [f32; 9] {
        self.e
    }

    /// The elements transposed into column-major order, the flat layout
    /// `uniformMatrix3fv` expects when `transpose` is false.
    pub const fn to_column_major(&self) -> [f32; 9] {
        let e = &self.e;
        [e[0], e[3], e[6], e[1], e[4], e[7], e[2], e[5], e[8]]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        self.multiply(&rhs)
    }
}
