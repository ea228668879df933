//! Minicbor codecs for field types the derive cannot handle directly. All
//! decimals persist as canonical decimal strings; bitmap words persist as
//! 32-byte big-endian values.

pub mod decimal {
    use minicbor::{Decoder, Encoder};

    use crate::libraries::fixed_point::Decimal;

    pub fn encode<Ctx, W: minicbor::encode::Write>(
        v: &Decimal,
        e: &mut Encoder<W>,
        _ctx: &mut Ctx,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.str(&v.to_string())?;
        Ok(())
    }

    pub fn decode<Ctx>(d: &mut Decoder<'_>, _ctx: &mut Ctx) -> Result<Decimal, minicbor::decode::Error> {
        let s = d.str()?;
        s.parse()
            .map_err(|_| minicbor::decode::Error::message("invalid decimal string"))
    }
}

pub mod u256 {
    use ethnum::U256;
    use minicbor::{Decoder, Encoder};

    pub fn encode<Ctx, W: minicbor::encode::Write>(
        v: &U256,
        e: &mut Encoder<W>,
        _ctx: &mut Ctx,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.bytes(&v.to_be_bytes())?;
        Ok(())
    }

    pub fn decode<Ctx>(d: &mut Decoder<'_>, _ctx: &mut Ctx) -> Result<U256, minicbor::decode::Error> {
        let bytes = d.bytes()?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| minicbor::decode::Error::message("expected 32 bytes"))?;
        Ok(U256::from_be_bytes(bytes))
    }
}

pub mod bitmap {
    use ethnum::U256;
    use minicbor::{Decoder, Encoder};

    use crate::libraries::tick_bitmap::{BitmapWord, TickBitmap};

    pub fn encode<Ctx, W: minicbor::encode::Write>(
        v: &TickBitmap,
        e: &mut Encoder<W>,
        _ctx: &mut Ctx,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.map(v.len() as u64)?;
        for (word_pos, word) in v {
            e.i16(*word_pos)?;
            e.bytes(&word.0.to_be_bytes())?;
        }
        Ok(())
    }

    pub fn decode<Ctx>(d: &mut Decoder<'_>, _ctx: &mut Ctx) -> Result<TickBitmap, minicbor::decode::Error> {
        let len = d
            .map()?
            .ok_or_else(|| minicbor::decode::Error::message("expected definite-length map"))?;
        let mut bitmap = TickBitmap::new();
        for _ in 0..len {
            let word_pos = d.i16()?;
            let bytes: [u8; 32] = d
                .bytes()?
                .try_into()
                .map_err(|_| minicbor::decode::Error::message("expected 32 bytes"))?;
            bitmap.insert(word_pos, BitmapWord(U256::from_be_bytes(bytes)));
        }
        Ok(bitmap)
    }
}

pub mod tick_range_map {
    use indexmap::IndexMap;
    use minicbor::{Decoder, Encoder};

    pub fn encode<Ctx, W: minicbor::encode::Write>(
        v: &IndexMap<String, Vec<String>>,
        e: &mut Encoder<W>,
        _ctx: &mut Ctx,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.map(v.len() as u64)?;
        for (range, position_ids) in v {
            e.str(range)?;
            e.array(position_ids.len() as u64)?;
            for id in position_ids {
                e.str(id)?;
            }
        }
        Ok(())
    }

    pub fn decode<Ctx>(
        d: &mut Decoder<'_>,
        _ctx: &mut Ctx,
    ) -> Result<IndexMap<String, Vec<String>>, minicbor::decode::Error> {
        let len = d
            .map()?
            .ok_or_else(|| minicbor::decode::Error::message("expected definite-length map"))?;
        let mut map = IndexMap::new();
        for _ in 0..len {
            let range = d.str()?.to_string();
            let count = d
                .array()?
                .ok_or_else(|| minicbor::decode::Error::message("expected definite-length array"))?;
            let mut ids = Vec::with_capacity(count as usize);
            for _ in 0..count {
                ids.push(d.str()?.to_string());
            }
            map.insert(range, ids);
        }
        Ok(map)
    }
}
